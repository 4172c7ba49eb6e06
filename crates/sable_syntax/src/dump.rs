//! The AST dumper.
//!
//! Serializes a parsed tree as JSON: every non-nil node becomes
//! `{"<tag>": payload}`, where the payload is an array of child dumps for
//! binary and conditional nodes, a single child dump for unary nodes, and
//! the literal itself for leaves. Nil nodes and absent children are `null`.
//! Scopes, values, and routines dump as named objects with their tables and
//! statements in source order.
//!
//! This output is the canonical externalization of the AST; the end-to-end
//! tests anchor on it.

use serde_json::{json, Map, Value as Json};

use sable_base::Interner;

use crate::ast::{Expr, ExprKind, Label, Routine, Scope, Stmt, Value};

/// Wraps a payload as `{"<tag>": payload}`.
fn tagged(tag: &str, payload: Json) -> Json {
    let mut object = Map::with_capacity(1);
    object.insert(tag.to_string(), payload);
    Json::Object(object)
}

/// Dumps one expression tree.
pub fn dump_expr(expr: &Expr<'_>, interner: &Interner) -> Json {
    match &expr.kind {
        ExprKind::Nil => Json::Null,
        ExprKind::Integer(value) => json!({ "integer": value }),
        ExprKind::Real(value) => json!({ "real": value }),
        ExprKind::Text(bytes) => {
            json!({ "string": String::from_utf8_lossy(bytes) })
        }
        ExprKind::Reference(symbol) => {
            json!({ "reference": interner.resolve(*symbol) })
        }
        ExprKind::Unary { op, operand } => {
            tagged(op.name(), dump_expr(operand, interner))
        }
        ExprKind::Binary { op, left, right } => tagged(
            op.name(),
            json!([dump_expr(left, interner), dump_expr(right, interner)]),
        ),
        ExprKind::Condition { condition, consequence, alternative } => {
            json!({ "condition": [
                dump_expr(condition, interner),
                dump_expr(consequence, interner),
                alternative.map_or(Json::Null, |a| dump_expr(a, interner)),
            ] })
        }
    }
}

fn dump_value(value: &Value<'_>, interner: &Interner) -> Json {
    json!({ "value": {
        "identifier": interner.resolve(value.identifier),
        "type": value.type_expr.map_or(Json::Null, |t| dump_expr(t, interner)),
        "initialization": value.initializer.map_or(Json::Null, |i| dump_expr(i, interner)),
        "constant": value.constant,
    } })
}

fn dump_label(label: &Label, interner: &Interner) -> Json {
    json!({ "label": {
        "identifier": interner.resolve(label.identifier),
        "position": label.position,
    } })
}

fn dump_routine(routine: &Routine<'_>, interner: &Interner) -> Json {
    json!({ "routine": {
        "identifier": interner.resolve(routine.identifier),
        "parameters": dump_expr(routine.parameters, interner),
        "scope": routine.scope.map_or(Json::Null, |s| dump_scope(s, interner)),
    } })
}

fn dump_stmt(stmt: &Stmt<'_>, interner: &Interner) -> Json {
    match stmt {
        // the full declaration lives in the scope's value table
        Stmt::Value(value) => json!({ "value": interner.resolve(value.identifier) }),
        Stmt::Expr(expr) => dump_expr(expr, interner),
        Stmt::Scope(scope) => dump_scope(scope, interner),
    }
}

/// Dumps a scope with its tables and statements in source order.
pub fn dump_scope(scope: &Scope<'_>, interner: &Interner) -> Json {
    json!({ "scope": {
        "values": scope.values.iter().map(|v| dump_value(v, interner)).collect::<Vec<_>>(),
        "labels": scope.labels.iter().map(|l| dump_label(l, interner)).collect::<Vec<_>>(),
        "routines": scope.routines.iter().map(|r| dump_routine(r, interner)).collect::<Vec<_>>(),
        "statements": scope.statements.iter().map(|s| dump_stmt(s, interner)).collect::<Vec<_>>(),
    } })
}
