//! Indented structure dump of an expression tree

use std::fmt;

use super::ast::Expression;

/// Indented node listing of an expression, one line per node attribute
///
/// Each node prints its kind, then its literal value or operator symbol when
/// it has one, then its children one level deeper. Lines are joined with
/// `\n` and carry no trailing newline.
pub struct TreeDump<'a>(pub &'a Expression);

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

/// Render `expr` with [`TreeDump`]
pub fn render_tree(expr: &Expression) -> String {
    TreeDump(expr).to_string()
}

fn write_node(f: &mut fmt::Formatter, expr: &Expression, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);

    if depth > 0 {
        writeln!(f)?;
    }
    write!(f, "{pad}Node Type: {}", expr.kind_name())?;
    if let Some(value) = expr.literal() {
        write!(f, "\n{pad}  Value: {value}")?;
    }
    if let Some(op) = expr.operator() {
        write!(f, "\n{pad}  Operator: {op}")?;
    }

    for child in expr.children() {
        write_node(f, child, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{BinaryOp, UnaryOp};

    #[test]
    fn test_render_binary() {
        let expr = Expression::binary(BinaryOp::Add, Expression::int(1), Expression::float(2.5));
        assert_eq!(
            render_tree(&expr),
            "Node Type: BinaryOpNode\n  Operator: +\n  Node Type: NumberNode\n    Value: 1\n  Node Type: NumberNode\n    Value: 2.5"
        );
    }

    #[test]
    fn test_render_nested_containers() {
        let expr = Expression::unary(
            UnaryOp::Not,
            Expression::List(vec![Expression::String("a b".to_string()), Expression::Boolean(false)]),
        );
        let expected = [
            "Node Type: UnaryOpNode",
            "  Operator: not",
            "  Node Type: ListNode",
            "    Node Type: StringNode",
            "      Value: a b",
            "    Node Type: BooleanNode",
            "      Value: False",
        ]
        .join("\n");
        assert_eq!(render_tree(&expr), expected);
    }

    #[test]
    fn test_render_not_equal_spellings() {
        let bang = Expression::binary(BinaryOp::BangEq, Expression::int(1), Expression::int(2));
        let angle = Expression::binary(BinaryOp::NotEq, Expression::int(1), Expression::int(2));
        assert_eq!(render_tree(&bang).lines().nth(1), Some("  Operator: !="));
        assert_eq!(render_tree(&angle).lines().nth(1), Some("  Operator: <>"));
    }

    #[test]
    fn test_display_matches_render() {
        let expr = Expression::TupleIndex {
            index: Box::new(Expression::int(1)),
            tuple: Box::new(Expression::Tuple(vec![Expression::int(7)])),
        };
        let expected = [
            "Node Type: TupleIndexNode",
            "  Node Type: NumberNode",
            "    Value: 1",
            "  Node Type: TupleNode",
            "    Node Type: NumberNode",
            "      Value: 7",
        ]
        .join("\n");
        assert_eq!(format!("{}", TreeDump(&expr)), expected);
        assert_eq!(render_tree(&expr), expected);
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_tree(&Expression::List(vec![])), "Node Type: ListNode");
    }
}
