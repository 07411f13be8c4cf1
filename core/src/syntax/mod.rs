mod ast;

pub use ast::{
    BinaryOp, CompareOp, Expr, FunctionLiteral, LanguageMode, Literal, Stmt, UnaryOp,
    VariableLocation,
};
