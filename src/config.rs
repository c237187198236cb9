//! 规则配置：expectation、ignore 选项与 ignoreFunctions 匹配器。
//! 所有校验都在构造 [`RuleConfig`] 时一次性完成，求值阶段不会再遇到非法配置。

use crate::error::{LintError, LintResult};
use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 对命名参数的期望。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// 每个参数都必须是命名参数。
    Always,
    /// 不允许出现命名参数。
    Never,
}

impl FromStr for Expectation {
    type Err = LintError;

    fn from_str(raw: &str) -> LintResult<Self> {
        match raw {
            "always" => Ok(Expectation::Always),
            "never" => Ok(Expectation::Never),
            other => Err(LintError::InvalidExpectation(other.to_string())),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Always => f.write_str("always"),
            Expectation::Never => f.write_str("never"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreOption {
    /// 只有一个参数的调用不做检查。
    SingleArgument,
}

impl FromStr for IgnoreOption {
    type Err = LintError;

    fn from_str(raw: &str) -> LintResult<Self> {
        match raw {
            "single-argument" => Ok(IgnoreOption::SingleArgument),
            other => Err(LintError::InvalidIgnore(other.to_string())),
        }
    }
}

/// `ignoreFunctions` 中的一项，加载配置时即判定为精确匹配或正则匹配。
#[derive(Debug, Clone)]
pub enum FunctionMatcher {
    Exact(String),
    Pattern(Regex),
}

impl FunctionMatcher {
    /// 解析单个条目：形如 `/pattern/flags` 的文本编译为正则，其余按函数名精确匹配。
    pub fn parse(raw: &str) -> LintResult<Self> {
        let Some(body) = raw.strip_prefix('/') else {
            return Ok(FunctionMatcher::Exact(raw.to_string()));
        };
        let Some(close) = body.rfind('/') else {
            return Ok(FunctionMatcher::Exact(raw.to_string()));
        };
        let pattern = &body[..close];
        let flags = &body[close + 1..];

        let mut case_insensitive = false;
        let mut multi_line = false;
        let mut dot_all = false;
        let mut sticky = false;
        for flag in flags.chars() {
            match flag {
                'i' => case_insensitive = true,
                'm' => multi_line = true,
                's' => dot_all = true,
                'y' => sticky = true,
                // 全局匹配与 unicode 模式对一次性测试没有影响
                'g' | 'u' => {}
                other => return Err(LintError::pattern_flag(raw, other)),
            }
        }

        let source = if sticky {
            format!(r"\A(?:{pattern})")
        } else {
            pattern.to_string()
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .multi_line(multi_line)
            .dot_matches_new_line(dot_all)
            .build()
            .map_err(|err| LintError::pattern(raw, err))?;
        Ok(FunctionMatcher::Pattern(regex))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            FunctionMatcher::Exact(expected) => expected == name,
            FunctionMatcher::Pattern(regex) => regex.is_match(name),
        }
    }
}

/// 规则的原始选项，对应 JSON 配置中的第二项。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleOptions {
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub ignore_functions: Vec<String>,
}

/// stylelint 风格的规则设置：`"always"` 或 `["always", { ... }]`。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RuleSetting {
    Primary(String),
    WithOptions(String, RuleOptions),
}

/// 校验完成、可以直接用于求值的规则配置。
///
/// 配置本身不可变，可以在多个线程之间共享。
#[derive(Debug, Clone)]
pub struct RuleConfig {
    pub expectation: Expectation,
    pub ignore: IndexSet<IgnoreOption>,
    pub ignore_functions: Vec<FunctionMatcher>,
}

impl RuleConfig {
    pub fn new(expectation: Expectation) -> Self {
        Self {
            expectation,
            ignore: IndexSet::new(),
            ignore_functions: Vec::new(),
        }
    }

    /// 从字符串形式的 expectation 与可选的原始选项构造配置。
    pub fn from_options(expectation: &str, options: Option<RuleOptions>) -> LintResult<Self> {
        let mut config = Self::new(expectation.parse()?);
        let options = options.unwrap_or_default();
        for raw in &options.ignore {
            config.ignore.insert(raw.parse()?);
        }
        for raw in &options.ignore_functions {
            config.ignore_functions.push(FunctionMatcher::parse(raw)?);
        }
        tracing::debug!(
            expectation = %config.expectation,
            ignore = config.ignore.len(),
            ignore_functions = config.ignore_functions.len(),
            "at-function-named-arguments 配置已加载"
        );
        Ok(config)
    }

    /// 解析 JSON 形式的规则设置。
    pub fn from_json(source: &str) -> LintResult<Self> {
        match serde_json::from_str::<RuleSetting>(source)? {
            RuleSetting::Primary(expectation) => Self::from_options(&expectation, None),
            RuleSetting::WithOptions(expectation, options) => {
                Self::from_options(&expectation, Some(options))
            }
        }
    }

    pub fn with_ignore(mut self, option: IgnoreOption) -> Self {
        self.ignore.insert(option);
        self
    }

    pub fn with_ignored_function(mut self, matcher: FunctionMatcher) -> Self {
        self.ignore_functions.push(matcher);
        self
    }

    pub fn ignores(&self, option: IgnoreOption) -> bool {
        self.ignore.contains(&option)
    }

    pub fn is_function_ignored(&self, name: &str) -> bool {
        self.ignore_functions
            .iter()
            .any(|matcher| matcher.matches(name))
    }
}
