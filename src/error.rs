use thiserror::Error;

/// 规则配置阶段统一的错误类型；求值阶段本身不会失败。
#[derive(Debug, Error)]
pub enum LintError {
    #[error("无效的 expectation \"{0}\"，可选值为 \"always\" 或 \"never\"")]
    InvalidExpectation(String),
    #[error("无效的 ignore 选项 \"{0}\"，仅支持 \"single-argument\"")]
    InvalidIgnore(String),
    #[error("ignoreFunctions 中的正则 {pattern} 编译失败: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("ignoreFunctions 中的正则 {pattern} 含有不支持的标志 '{flag}'")]
    InvalidPatternFlag { pattern: String, flag: char },
    #[error("规则配置解析失败: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

pub type LintResult<T> = Result<T, LintError>;

impl LintError {
    pub fn pattern<S: Into<String>>(pattern: S, source: regex::Error) -> Self {
        LintError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn pattern_flag<S: Into<String>>(pattern: S, flag: char) -> Self {
        LintError::InvalidPatternFlag {
            pattern: pattern.into(),
            flag,
        }
    }
}
