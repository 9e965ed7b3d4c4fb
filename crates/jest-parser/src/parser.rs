use crate::error::{ParserError, Result};
use crate::language::Language;
use std::path::Path;
use testlens_tree::{NodeId, Position, TestForest, TestKind, TestNode};
use tree_sitter::{Node, Parser};

/// Parser adapter turning Jest test sources into a [`TestForest`]
pub struct TestFileParser {
    parser: Parser,
    #[allow(dead_code)]
    language: Language,
}

impl TestFileParser {
    /// Create a new parser for a language
    pub fn new(language: Language) -> Result<Self> {
        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| ParserError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser, language })
    }

    /// Create a parser for the language detected from a file path
    pub fn for_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Language::from_path(path))
    }

    /// Read and parse a test file from disk
    pub fn parse_file(path: impl AsRef<Path>) -> Result<TestForest> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::for_path(path)?.parse(&content)
    }

    /// Parse test source into an ordered declaration forest
    pub fn parse(&mut self, content: &str) -> Result<TestForest> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| ParserError::parse("Failed to parse source code"))?;

        let mut forest = TestForest::new();
        self.collect(content, tree.root_node(), &mut forest, None)?;
        log::debug!("Collected {} declarations", forest.len());
        Ok(forest)
    }

    /// Walk the AST, pushing recognized Jest calls into the forest.
    ///
    /// Declarations found inside a recognized call's arguments (the callback
    /// body) are nested under it; everything else is traversed transparently.
    fn collect(
        &self,
        content: &str,
        node: Node,
        forest: &mut TestForest,
        parent: Option<NodeId>,
    ) -> Result<()> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "call_expression" {
                if let Some(kind) = Self::classify_call(content, child) {
                    let name = Self::first_string_argument(content, child).unwrap_or_default();
                    let decl = TestNode::new(kind, name, start_of(child), end_of(child));
                    let id = match parent {
                        Some(p) => forest.push_child(p, decl)?,
                        None => forest.push_root(decl),
                    };
                    if let Some(args) = child.child_by_field_name("arguments") {
                        self.collect(content, args, forest, Some(id))?;
                    }
                    continue;
                }
            }
            self.collect(content, child, forest, parent)?;
        }
        Ok(())
    }

    /// Classify a call expression by its base callee identifier
    fn classify_call(content: &str, call: Node) -> Option<TestKind> {
        let callee = call.child_by_field_name("function")?;
        let base = Self::base_identifier(content, callee)?;
        match base {
            "describe" | "fdescribe" | "xdescribe" => Some(TestKind::Suite),
            "it" | "fit" | "xit" | "test" | "xtest" => Some(TestKind::Test),
            "expect" => Some(TestKind::Assertion),
            _ => None,
        }
    }

    /// Resolve the leftmost identifier of a callee expression.
    ///
    /// Handles `test`, `test.only`, `it.each(table)(...)` and chained
    /// member/call combinations thereof.
    fn base_identifier<'a>(content: &'a str, node: Node) -> Option<&'a str> {
        match node.kind() {
            "identifier" => content.get(node.byte_range()),
            "member_expression" => {
                Self::base_identifier(content, node.child_by_field_name("object")?)
            }
            "call_expression" => {
                Self::base_identifier(content, node.child_by_field_name("function")?)
            }
            _ => None,
        }
    }

    /// Extract the first string or template literal argument as display name
    fn first_string_argument(content: &str, call: Node) -> Option<String> {
        let args = call.child_by_field_name("arguments")?;
        let mut cursor = args.walk();
        for arg in args.children(&mut cursor) {
            match arg.kind() {
                "string" | "template_string" => {
                    let raw = content.get(arg.byte_range())?;
                    return Some(strip_delimiters(raw).to_string());
                }
                _ => {}
            }
        }
        None
    }
}

/// Drop the surrounding quote or backtick pair from a literal
fn strip_delimiters(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2
        && matches!(trimmed.as_bytes()[0], b'\'' | b'"' | b'`')
        && trimmed.as_bytes()[trimmed.len() - 1] == trimmed.as_bytes()[0]
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

fn start_of(node: Node) -> Position {
    Position::new(node.start_position().row + 1, node.start_position().column)
}

fn end_of(node: Node) -> Position {
    Position::new(node.end_position().row + 1, node.end_position().column)
}
