/// CSS 原生函数（小写）。这些函数由 CSS 本身定义，不接受命名参数。
const NATIVE_CSS_FUNCTIONS: &[&str] = &[
    "annotation",
    "attr",
    "blur",
    "brightness",
    "calc",
    "character-variant",
    "circle",
    "clamp",
    "color-mix",
    "conic-gradient",
    "contrast",
    "counter",
    "counters",
    "cross-fade",
    "cubic-bezier",
    "drop-shadow",
    "element",
    "ellipse",
    "env",
    "fit-content",
    "format",
    "frames",
    "grayscale",
    "hsl",
    "hsla",
    "hue-rotate",
    "hwb",
    "image",
    "image-set",
    "inset",
    "invert",
    "lab",
    "lch",
    "leader",
    "linear-gradient",
    "local",
    "matrix",
    "matrix3d",
    "max",
    "min",
    "minmax",
    "opacity",
    "ornaments",
    "path",
    "perspective",
    "polygon",
    "radial-gradient",
    "rect",
    "repeat",
    "repeating-conic-gradient",
    "repeating-linear-gradient",
    "repeating-radial-gradient",
    "rgb",
    "rgba",
    "rotate",
    "rotate3d",
    "rotatex",
    "rotatey",
    "rotatez",
    "saturate",
    "scale",
    "scale3d",
    "scalex",
    "scaley",
    "scalez",
    "sepia",
    "skew",
    "skewx",
    "skewy",
    "steps",
    "styleset",
    "stylistic",
    "swash",
    "symbols",
    "target-counter",
    "target-counters",
    "target-text",
    "translate",
    "translate3d",
    "translatex",
    "translatey",
    "translatez",
    "url",
    "var",
];

/// 判断函数名是否为 CSS 原生函数，忽略大小写。
pub fn is_native_css_function(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    NATIVE_CSS_FUNCTIONS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_functions_ignore_case() {
        assert!(is_native_css_function("calc"));
        assert!(is_native_css_function("URL"));
        assert!(is_native_css_function("translateX"));
        assert!(!is_native_css_function("mix"));
        assert!(!is_native_css_function(""));
    }
}
