use crate::arguments::{extract_arguments, Argument};
use crate::config::{Expectation, IgnoreOption, RuleConfig};
use crate::utils::is_native_css_function;
use crate::value_parser::parse_value;
use std::fmt::{self, Display};

pub const RULE_NAME: &str = "scss/at-function-named-arguments";

/// 违规消息的类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// `always` 下出现了位置参数。
    Expected,
    /// `never` 下出现了命名参数。
    Rejected,
}

impl MessageKind {
    pub fn text(self) -> &'static str {
        match self {
            MessageKind::Expected => "a named parameter to be used in function call was expected",
            MessageKind::Rejected => "a named parameter was unexpected in function call",
        }
    }
}

/// 待检查的声明，违规都挂在声明上而不是具体参数的位置上。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new<P: Into<String>, V: Into<String>>(property: P, value: V) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// 一条违规，文本均借用自被检查的声明。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation<'a> {
    pub rule: &'static str,
    pub kind: MessageKind,
    /// 所属声明的属性名。
    pub property: &'a str,
    pub function: &'a str,
    /// 违规参数的原始文本（已裁剪空白）。
    pub argument: &'a str,
}

impl Violation<'_> {
    pub fn message(&self) -> &'static str {
        self.kind.text()
    }
}

impl Display for Violation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.rule)
    }
}

/// 规则求值器：对单条声明是纯函数，不在声明之间保留任何状态。
pub struct Evaluator<'c> {
    config: &'c RuleConfig,
}

impl<'c> Evaluator<'c> {
    pub fn new(config: &'c RuleConfig) -> Self {
        Self { config }
    }

    pub fn evaluate<'a>(&self, declaration: &'a Declaration) -> Vec<Violation<'a>> {
        self.evaluate_value(&declaration.property, &declaration.value)
    }

    pub fn evaluate_value<'a>(&self, property: &'a str, value: &'a str) -> Vec<Violation<'a>> {
        let tree = parse_value(value);
        let mut violations = Vec::new();
        for function in tree.walk_functions() {
            self.check_call(property, tree.value(function), tree.inner(function), &mut violations);
        }
        violations
    }

    fn check_call<'a>(
        &self,
        property: &'a str,
        name: &'a str,
        inner: &'a str,
        violations: &mut Vec<Violation<'a>>,
    ) {
        if name.is_empty() || is_native_css_function(name) {
            return;
        }
        if self.config.is_function_ignored(name) {
            tracing::debug!(function = name, "函数在 ignoreFunctions 中，跳过检查");
            return;
        }

        let arguments: Vec<Argument<'a>> = extract_arguments(inner)
            .into_iter()
            .filter(|arg| !arg.is_blank())
            .collect();

        if arguments.len() == 1 && self.config.ignores(IgnoreOption::SingleArgument) {
            tracing::debug!(function = name, "单参数调用，跳过检查");
            return;
        }

        for arg in &arguments {
            let Some(kind) = self.judge(arg) else {
                continue;
            };
            let argument = arg.raw.trim();
            tracing::trace!(property, function = name, argument, "{}", kind.text());
            violations.push(Violation {
                rule: RULE_NAME,
                kind,
                property,
                function: name,
                argument,
            });
        }
    }

    fn judge(&self, arg: &Argument) -> Option<MessageKind> {
        match self.config.expectation {
            Expectation::Never if arg.is_named() => Some(MessageKind::Rejected),
            Expectation::Never => None,
            // `$name:` 指向预处理器变量，与命名参数一样放行
            Expectation::Always if arg.is_named() || arg.has_variable_key() => None,
            Expectation::Always => Some(MessageKind::Expected),
        }
    }
}
