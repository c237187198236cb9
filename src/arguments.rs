use once_cell::sync::Lazy;
use regex::Regex;

/// SCSS 预处理器变量的前缀。
pub const VARIABLE_SIGIL: char = '$';

/// 函数调用中的一个顶层参数，所有文本都借用自被切分的源码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument<'a> {
    /// 参数名，位置参数为 `None`。
    pub key: Option<&'a str>,
    /// 去掉 `name:` / `name=` 前缀、前导注释并裁剪空白后的值。
    pub value: &'a str,
    /// 切分得到的原始片段，不做任何裁剪。
    pub raw: &'a str,
    /// 结束该片段的顶层分隔符，最后一个参数为 `None`。
    pub separator: Option<char>,
}

impl<'a> Argument<'a> {
    fn from_segment(raw: &'a str, separator: Option<char>) -> Self {
        // 标识符字符：ASCII 字母数字、`_`、`-`、任意非 ASCII 字符以及 CSS 转义
        static NAMED_ARGUMENT_RE: Lazy<Regex> = Lazy::new(|| {
            let escape = r"\\[0-9A-Fa-f]{1,6}\s?|\\[^0-9A-Fa-f\r\n]";
            let start = format!(r"[A-Za-z_-]|[^\x00-\x7F]|{escape}");
            let rest = format!(r"[A-Za-z0-9_-]|[^\x00-\x7F]|{escape}");
            Regex::new(&format!(r"^([$@]?(?:{start})(?:{rest})*)\s*([:=])"))
                .expect("命名参数正则编译失败")
        });

        let body = skip_leading_comments(raw.trim());
        let named = NAMED_ARGUMENT_RE.captures(body).and_then(|caps| {
            let key = caps.get(1)?.as_str();
            let rest = &body[caps.get(0)?.end()..];
            // `$a == b` 是比较表达式而不是命名参数
            if &caps[2] == "=" && rest.starts_with('=') {
                return None;
            }
            Some((key, rest.trim()))
        });

        let (key, value) = match named {
            Some((key, value)) => (Some(key), value),
            None => (None, body),
        };

        Self {
            key,
            value,
            raw,
            separator,
        }
    }

    pub fn is_named(&self) -> bool {
        self.key.is_some()
    }

    /// 参数名是否为预处理器变量（如 `$color`）。
    pub fn has_variable_key(&self) -> bool {
        self.key.is_some_and(|key| key.starts_with(VARIABLE_SIGIL))
    }

    /// 尾随分隔符之后留下的空参数，或只含注释的参数。
    pub fn is_blank(&self) -> bool {
        self.key.is_none() && self.value.is_empty()
    }
}

/// 跳过开头的 `/* ... */`，未闭合的注释吞掉剩余全部文本。
fn skip_leading_comments(mut text: &str) -> &str {
    while let Some(rest) = text.strip_prefix("/*") {
        text = match rest.find("*/") {
            Some(end) => rest[end + 2..].trim_start(),
            None => "",
        };
    }
    text
}

/// 切分时所处的词法状态。
#[derive(Clone, Copy)]
enum Scan {
    Normal,
    Quoted(u8),
    Comment,
}

/// 把函数括号内的文本切分为顶层参数。
///
/// `,` 与 `;` 只有在括号深度为 0 且不在引号或注释内时才视为参数边界。
/// 不完整的输入不会报错：未闭合的括号、引号或注释一直延伸到文本末尾。
pub fn extract_arguments(text: &str) -> Vec<Argument<'_>> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // 所有分隔符都是 ASCII，按字节扫描不会切开多字节字符
    let bytes = text.as_bytes();
    let mut arguments = Vec::new();
    let mut scan = Scan::Normal;
    let mut depth = 0usize;
    let mut segment_start = 0;
    let mut idx = 0;

    while idx < bytes.len() {
        let byte = bytes[idx];
        match scan {
            Scan::Comment => {
                if bytes[idx..].starts_with(b"*/") {
                    scan = Scan::Normal;
                    idx += 2;
                    continue;
                }
            }
            Scan::Quoted(quote) => {
                if byte == b'\\' {
                    idx += 2;
                    continue;
                }
                if byte == quote {
                    scan = Scan::Normal;
                }
            }
            Scan::Normal => match byte {
                b'\\' => {
                    idx += 2;
                    continue;
                }
                b'/' if bytes.get(idx + 1) == Some(&b'*') => {
                    scan = Scan::Comment;
                    idx += 2;
                    continue;
                }
                b'\'' | b'"' => scan = Scan::Quoted(byte),
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                b',' | b';' if depth == 0 => {
                    arguments.push(Argument::from_segment(
                        &text[segment_start..idx],
                        Some(char::from(byte)),
                    ));
                    segment_start = idx + 1;
                }
                _ => {}
            },
        }
        idx += 1;
    }

    arguments.push(Argument::from_segment(&text[segment_start..], None));
    arguments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rejoin(arguments: &[Argument]) -> String {
        let mut text = String::new();
        for arg in arguments {
            text.push_str(arg.raw);
            if let Some(sep) = arg.separator {
                text.push(sep);
            }
        }
        text
    }

    fn pairs<'a>(arguments: &[Argument<'a>]) -> Vec<(Option<&'a str>, &'a str)> {
        arguments.iter().map(|arg| (arg.key, arg.value)).collect()
    }

    #[test]
    fn nested_calls_are_not_split() {
        let args = extract_arguments("rgba(0,0,0,.5), $x: 2");
        assert_eq!(
            pairs(&args),
            vec![(None, "rgba(0,0,0,.5)"), (Some("$x"), "2")]
        );
    }

    #[test]
    fn empty_text_has_no_arguments() {
        assert!(extract_arguments("").is_empty());
        assert!(extract_arguments("  \n ").is_empty());
    }

    #[test]
    fn raw_segments_rejoin_to_source() {
        let inputs = [
            "a, b ,c",
            "$a: 1; $b = 2",
            "rgba(0,0,0,.5), \"x, y\", 'q;r'",
            "foo(bar(1, 2), 3), ,",
            "  spaced  ,  ",
            "unbalanced(1, 2",
            "'open, quote",
            r#""esc\", aped", 1"#,
            "/* a, b */ $x: 1, /* open",
            "$größe: 1, ü\\",
        ];
        for input in inputs {
            let args = extract_arguments(input);
            assert_eq!(rejoin(&args), input);
        }
    }

    #[test]
    fn quoted_separators_stay_inside_argument() {
        let args = extract_arguments(r#""a, b", 'c; d', "e\", f""#);
        assert_eq!(
            pairs(&args),
            vec![
                (None, r#""a, b""#),
                (None, "'c; d'"),
                (None, r#""e\", f""#),
            ]
        );
    }

    #[test]
    fn commented_separators_stay_inside_argument() {
        let args = extract_arguments("/* a, b */ $x: 1");
        assert_eq!(pairs(&args), vec![(Some("$x"), "1")]);

        let args = extract_arguments("1 /* ; */, 2");
        assert_eq!(pairs(&args), vec![(None, "1 /* ; */"), (None, "2")]);

        // 只含注释的参数与空参数一样不计数
        let args = extract_arguments("/* only */, 2, /* never closed, 3");
        assert_eq!(args.len(), 3);
        assert!(args[0].is_blank());
        assert!(args[2].is_blank());
    }

    #[test]
    fn colon_and_equals_both_name_a_parameter() {
        let args = extract_arguments("$color: red; weight = 50%, @size:10px");
        assert_eq!(
            pairs(&args),
            vec![
                (Some("$color"), "red"),
                (Some("weight"), "50%"),
                (Some("@size"), "10px"),
            ]
        );
        assert_eq!(args[0].separator, Some(';'));
        assert_eq!(args[1].separator, Some(','));
        assert_eq!(args[2].separator, None);
    }

    #[test]
    fn unicode_and_escaped_identifiers_are_keys() {
        let args = extract_arguments(r"$größe: 1, $\31 x: 2, $a\:b: 3, 名前 = 4");
        assert_eq!(
            pairs(&args),
            vec![
                (Some("$größe"), "1"),
                (Some(r"$\31 x"), "2"),
                (Some(r"$a\:b"), "3"),
                (Some("名前"), "4"),
            ]
        );
        assert!(args[1].has_variable_key());
    }

    #[test]
    fn non_identifier_prefixes_are_positional() {
        let args = extract_arguments(": orphan, \"key: inside\", $a == $b, 1:2");
        assert_eq!(
            pairs(&args),
            vec![
                (None, ": orphan"),
                (None, "\"key: inside\""),
                (None, "$a == $b"),
                (None, "1:2"),
            ]
        );
    }

    #[test]
    fn unbalanced_input_degrades_gracefully() {
        let args = extract_arguments("a, fn(b, c");
        assert_eq!(pairs(&args), vec![(None, "a"), (None, "fn(b, c")]);

        let args = extract_arguments("x)), y");
        assert_eq!(pairs(&args), vec![(None, "x))"), (None, "y")]);

        let args = extract_arguments("'never, closed");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn trailing_separator_leaves_blank_argument() {
        let args = extract_arguments("$a: 1,");
        assert_eq!(args.len(), 2);
        assert!(!args[0].is_blank());
        assert!(args[1].is_blank());
    }

    #[test]
    fn only_dollar_keys_are_variables() {
        let args = extract_arguments("$color: red, @size: 2, size: 2, 3");
        assert!(args[0].has_variable_key());
        assert!(args[1].is_named());
        assert!(!args[1].has_variable_key());
        assert!(args[2].is_named());
        assert!(!args[2].has_variable_key());
        assert!(!args[3].is_named());
    }
}
