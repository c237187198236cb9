//! 声明值分词器：把一段声明值切分为 function / word / string 等节点组成的树。
//! 整个过程只依赖显式的帧栈，嵌套深度不受调用栈限制，遇到不完整的输入也不会报错。

use std::ops::Range;

/// 节点在 [`ValueTree`] 中的下标。
pub type NodeId = usize;

/// 节点类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Function,
    Word,
    String,
    Space,
    Div,
    Comment,
}

/// 声明值中的一个节点，文本均以字节范围的形式指向源码。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueNode {
    pub kind: NodeKind,
    /// 函数名、单词文本、去掉引号的字符串内容、分隔符或注释内容。
    pub value: Range<usize>,
    /// 节点在源码中的完整范围。
    pub source: Range<usize>,
    /// 仅函数节点有效：括号内部的范围。
    pub inner: Range<usize>,
    /// 仅函数节点有效：括号内部的子节点（包含分隔符）。
    pub children: Vec<NodeId>,
    /// 函数缺少 `)` 或字符串缺少结束引号。
    pub unclosed: bool,
}

impl ValueNode {
    fn leaf(kind: NodeKind, value: Range<usize>, source: Range<usize>) -> Self {
        Self {
            kind,
            value,
            source,
            inner: 0..0,
            children: Vec::new(),
            unclosed: false,
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind == NodeKind::Function
    }
}

/// 解析结果：所有节点平铺存放在同一个数组中，父子关系只记录下标，
/// 因此释放任意深度的嵌套都不会递归。
#[derive(Debug, Clone)]
pub struct ValueTree<'a> {
    source: &'a str,
    nodes: Vec<ValueNode>,
    roots: Vec<NodeId>,
}

impl<'a> ValueTree<'a> {
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn get(&self, id: NodeId) -> &ValueNode {
        &self.nodes[id]
    }

    /// 顶层节点，按源码顺序排列。
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn value(&self, node: &ValueNode) -> &'a str {
        &self.source[node.value.clone()]
    }

    pub fn text(&self, node: &ValueNode) -> &'a str {
        &self.source[node.source.clone()]
    }

    pub fn inner(&self, node: &ValueNode) -> &'a str {
        &self.source[node.inner.clone()]
    }

    /// 以先序遍历的方式收集所有函数节点（包含嵌套在其他函数内部的调用）。
    pub fn walk_functions(&self) -> Vec<&ValueNode> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_function() {
                found.push(node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        found
    }
}

/// 解析声明值。
pub fn parse_value(input: &str) -> ValueTree<'_> {
    ValueParser::new(input).parse()
}

/// 尚未遇到 `)` 的函数调用。
struct Frame {
    name: Range<usize>,
    start: usize,
    inner_start: usize,
    children: Vec<NodeId>,
}

struct ValueParser<'a> {
    cursor: Cursor<'a>,
    frames: Vec<Frame>,
    nodes: Vec<ValueNode>,
    roots: Vec<NodeId>,
}

impl<'a> ValueParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            frames: Vec::new(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn parse(mut self) -> ValueTree<'a> {
        while let Some(ch) = self.cursor.peek_char() {
            let start = self.cursor.position();
            match ch {
                c if c.is_whitespace() => {
                    self.cursor.skip_whitespace();
                    let span = start..self.cursor.position();
                    self.emit(ValueNode::leaf(NodeKind::Space, span.clone(), span));
                }
                '\'' | '"' => self.read_string(ch, start),
                '/' if self.cursor.starts_with_str("/*") => {
                    self.cursor.match_str("/*");
                    self.read_comment(start);
                }
                ',' | '/' | ':' | ';' => {
                    self.cursor.advance_char();
                    let span = start..self.cursor.position();
                    self.emit(ValueNode::leaf(NodeKind::Div, span.clone(), span));
                }
                '(' => {
                    self.cursor.advance_char();
                    self.open_function(start..start, start);
                }
                ')' => {
                    self.cursor.advance_char();
                    self.close_function(start);
                }
                _ => {
                    self.cursor.read_word();
                    let span = start..self.cursor.position();
                    if self.cursor.peek_char() == Some('(') {
                        self.cursor.advance_char();
                        self.open_function(span, start);
                    } else {
                        self.emit(ValueNode::leaf(NodeKind::Word, span.clone(), span));
                    }
                }
            }
        }

        // 未闭合的函数一直延伸到文本末尾。
        let end = self.cursor.position();
        while let Some(frame) = self.frames.pop() {
            self.emit(Self::finish_frame(frame, end, end, true));
        }

        ValueTree {
            source: self.cursor.source,
            nodes: self.nodes,
            roots: self.roots,
        }
    }

    fn alloc(&mut self, node: ValueNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn emit(&mut self, node: ValueNode) {
        let id = self.alloc(node);
        match self.frames.last_mut() {
            Some(frame) => frame.children.push(id),
            None => self.roots.push(id),
        }
    }

    fn open_function(&mut self, name: Range<usize>, start: usize) {
        let inner_start = self.cursor.position();
        let is_url = self.cursor.slice(name.start, name.end).eq_ignore_ascii_case("url");
        if is_url && self.cursor.lookahead_is_unquoted_url() {
            self.read_unquoted_url(name, start, inner_start);
            return;
        }
        self.frames.push(Frame {
            name,
            start,
            inner_start,
            children: Vec::new(),
        });
    }

    /// `close_start` 为 `)` 所在位置。
    fn close_function(&mut self, close_start: usize) {
        let end = self.cursor.position();
        match self.frames.pop() {
            Some(frame) => self.emit(Self::finish_frame(frame, close_start, end, false)),
            None => {
                let span = close_start..end;
                self.emit(ValueNode::leaf(NodeKind::Word, span.clone(), span));
            }
        }
    }

    fn finish_frame(frame: Frame, inner_end: usize, end: usize, unclosed: bool) -> ValueNode {
        ValueNode {
            kind: NodeKind::Function,
            value: frame.name,
            source: frame.start..end,
            inner: frame.inner_start..inner_end,
            children: frame.children,
            unclosed,
        }
    }

    fn read_string(&mut self, quote: char, start: usize) {
        self.cursor.advance_char();
        let content_start = self.cursor.position();
        let mut content_end = None;
        while let Some(ch) = self.cursor.peek_char() {
            if ch == quote {
                content_end = Some(self.cursor.position());
                self.cursor.advance_char();
                break;
            }
            self.cursor.advance_char();
            if ch == '\\' {
                self.cursor.advance_char();
            }
        }
        let end = self.cursor.position();
        let mut node = ValueNode::leaf(
            NodeKind::String,
            content_start..content_end.unwrap_or(end),
            start..end,
        );
        node.unclosed = content_end.is_none();
        self.emit(node);
    }

    fn read_comment(&mut self, start: usize) {
        let body_start = self.cursor.position();
        let mut body_end = None;
        while !self.cursor.is_eof() {
            let here = self.cursor.position();
            if self.cursor.match_str("*/") {
                body_end = Some(here);
                break;
            }
            self.cursor.advance_char();
        }
        let end = self.cursor.position();
        let mut node = ValueNode::leaf(
            NodeKind::Comment,
            body_start..body_end.unwrap_or(end),
            start..end,
        );
        node.unclosed = body_end.is_none();
        self.emit(node);
    }

    /// 未加引号的 `url(...)` 整体视为一个单词，内部的 `,` `;` 等不再切分。
    fn read_unquoted_url(&mut self, name: Range<usize>, start: usize, inner_start: usize) {
        let mut inner_end = None;
        while let Some(ch) = self.cursor.peek_char() {
            if ch == ')' {
                inner_end = Some(self.cursor.position());
                self.cursor.advance_char();
                break;
            }
            self.cursor.advance_char();
            if ch == '\\' {
                self.cursor.advance_char();
            }
        }
        let end = self.cursor.position();
        let inner = inner_start..inner_end.unwrap_or(end);

        let raw = self.cursor.slice(inner.start, inner.end);
        let body_start = inner.start + (raw.len() - raw.trim_start().len());
        let body = body_start..body_start + raw.trim().len();
        let mut children = Vec::new();
        if !body.is_empty() {
            children.push(self.alloc(ValueNode::leaf(NodeKind::Word, body.clone(), body)));
        }

        self.emit(ValueNode {
            kind: NodeKind::Function,
            value: name,
            source: start..end,
            inner,
            children,
            unclosed: inner_end.is_none(),
        });
    }
}

/// 带位置指针的输入游标，所有切片都直接借用源文本。
struct Cursor<'a> {
    source: &'a str,
    len: usize,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            len: source.len(),
            position: 0,
        }
    }

    fn position(&self) -> usize {
        self.position
    }

    fn is_eof(&self) -> bool {
        self.position >= self.len
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn advance_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn starts_with_str(&self, prefix: &str) -> bool {
        self.source[self.position..].starts_with(prefix)
    }

    fn match_str(&mut self, prefix: &str) -> bool {
        if self.source[self.position..].starts_with(prefix) {
            self.position += prefix.len();
            true
        } else {
            false
        }
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    fn read_word(&mut self) {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if Self::ends_word(ch) && self.position > start {
                break;
            }
            self.advance_char();
            if ch == '\\' {
                self.advance_char();
            }
        }
    }

    fn ends_word(ch: char) -> bool {
        ch.is_whitespace() || matches!(ch, '\'' | '"' | ',' | '/' | ':' | ';' | '(' | ')')
    }

    fn lookahead_is_unquoted_url(&self) -> bool {
        let rest = self.source[self.position..].trim_start();
        !matches!(rest.chars().next(), None | Some('\'') | Some('"') | Some(')'))
    }
}
