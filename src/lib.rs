//! named_args_oxide 库入口，实现 `scss/at-function-named-arguments` 规则，提供面向 Rust 与 Node.js 的接口。
//! 内部分为三个阶段：声明值分词（value_parser）→ 参数切分（arguments）→ 规则求值（rule）。

mod arguments;
mod config;
mod error;
mod rule;
mod utils;
mod value_parser;

pub use crate::arguments::{extract_arguments, Argument};
pub use crate::config::{Expectation, FunctionMatcher, IgnoreOption, RuleConfig, RuleOptions};
pub use crate::error::{LintError, LintResult};
pub use crate::rule::{Declaration, MessageKind, Violation, RULE_NAME};
pub use crate::utils::is_native_css_function;
pub use crate::value_parser::{parse_value, NodeId, NodeKind, ValueNode, ValueTree};

use rule::Evaluator;

/// 检查单条声明，违规均挂在该声明上。
///
/// # 参数
/// * `declaration` - 待检查的声明
/// * `config` - 已校验的规则配置
pub fn lint_declaration<'a>(
    declaration: &'a Declaration,
    config: &RuleConfig,
) -> Vec<Violation<'a>> {
    Evaluator::new(config).evaluate(declaration)
}

/// 只检查声明值，属性名留空。
pub fn lint_value<'a>(value: &'a str, config: &RuleConfig) -> Vec<Violation<'a>> {
    Evaluator::new(config).evaluate_value("", value)
}

/// 依次检查多条声明，结果按声明顺序拼接。
pub fn lint_declarations<'d, I>(declarations: I, config: &RuleConfig) -> Vec<Violation<'d>>
where
    I: IntoIterator<Item = &'d Declaration>,
{
    let evaluator = Evaluator::new(config);
    declarations
        .into_iter()
        .flat_map(|decl| evaluator.evaluate(decl))
        .collect()
}

#[cfg(feature = "node")]
use napi::{Error, Result};
#[cfg(feature = "node")]
use napi_derive::napi;

/// Node.js 侧的规则选项对象。
#[cfg(feature = "node")]
#[napi(object)]
pub struct JsRuleOptions {
    /// 例如 `["single-argument"]`。
    pub ignore: Option<Vec<String>>,
    /// 函数名或 `/pattern/flags` 形式的正则。
    pub ignore_functions: Option<Vec<String>>,
}

/// Node.js 侧的违规记录。
#[cfg(feature = "node")]
#[napi(object)]
pub struct JsViolation {
    pub rule: String,
    pub message: String,
    pub function: String,
    pub argument: String,
}

/// 暴露给 Node.js 的检查函数。
#[cfg(feature = "node")]
#[napi]
pub fn lint_named_arguments(
    value: String,
    expectation: String,
    options: Option<JsRuleOptions>,
) -> Result<Vec<JsViolation>> {
    let options = options.map(|opt| RuleOptions {
        ignore: opt.ignore.unwrap_or_default(),
        ignore_functions: opt.ignore_functions.unwrap_or_default(),
    });
    let config = RuleConfig::from_options(&expectation, options)
        .map_err(|err| Error::from_reason(err.to_string()))?;
    let violations = lint_value(&value, &config)
        .into_iter()
        .map(|violation| JsViolation {
            rule: violation.rule.to_string(),
            message: violation.to_string(),
            function: violation.function.to_string(),
            argument: violation.argument.to_string(),
        })
        .collect();
    Ok(violations)
}
