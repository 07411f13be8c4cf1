//! Input trees for the bytecode compiler.
//!
//! The compiler consumes an already-resolved tree: identifiers carry
//! their [`VariableLocation`], functions carry their frame counts, and
//! every node lives in a `bumpalo` arena owned by the embedder. Nothing
//! here parses or resolves.

use serde::Serialize;

use crate::vm::RuntimeFunctionId;

/// Semantics regime a function was parsed under. Selects between the
/// sloppy and strict property-access opcodes.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageMode {
    Sloppy,
    Strict,
}

/// Where a resolved identifier lives.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableLocation {
    /// Frame register, declared in this function.
    Local(u16),
    /// Parameter ordinal; 0 is the receiver.
    Parameter(u8),
    /// A `var` declared at script scope.
    Global,
    /// Not statically resolvable; reached as a named property of the
    /// global object.
    Unallocated,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    ShiftLeft,
    ShiftRight,
    ShiftRightLogical,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    EqualStrict,
    NotEqualStrict,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    In,
    InstanceOf,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Not,
    TypeOf,
    Void,
}

#[derive(Serialize, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Undefined,
    Null,
    Boolean(bool),
    /// All numbers arrive as doubles; the compiler picks the Smi
    /// encoding for integral values in range.
    Number(f64),
    Str(&'a str),
}

impl core::fmt::Debug for Literal<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Literal::Undefined => write!(f, "undefined"),
            Literal::Null => write!(f, "null"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Number(v) => write!(f, "{v}"),
            Literal::Str(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Literal(Literal<'a>),
    /// The receiver, parameter ordinal 0.
    This,
    Variable {
        name: &'a str,
        location: VariableLocation,
    },
    /// `target` is a `Variable` or `Property` node. The assigned value
    /// stays in the accumulator afterwards.
    Assignment {
        target: &'a Expr<'a>,
        value: &'a Expr<'a>,
    },
    Binary {
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Compare {
        op: CompareOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Unary {
        op: UnaryOp,
        expr: &'a Expr<'a>,
    },
    /// `object[key]`. A string-literal key is a named access; any other
    /// key expression is keyed.
    Property {
        object: &'a Expr<'a>,
        key: &'a Expr<'a>,
    },
    Call {
        callee: &'a Expr<'a>,
        args: &'a [&'a Expr<'a>],
    },
    /// Direct call into the runtime, `%name(...)` in source.
    CallRuntime {
        function: RuntimeFunctionId,
        args: &'a [&'a Expr<'a>],
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Stmt<'a> {
    Expression(&'a Expr<'a>),
    /// One declared name. Comma declarations arrive as consecutive
    /// statements.
    VariableDeclaration {
        name: &'a str,
        location: VariableLocation,
        initializer: Option<&'a Expr<'a>>,
    },
    If {
        condition: &'a Expr<'a>,
        then_branch: &'a [&'a Stmt<'a>],
        else_branch: Option<&'a [&'a Stmt<'a>]>,
    },
    While {
        condition: &'a Expr<'a>,
        body: &'a [&'a Stmt<'a>],
    },
    DoWhile {
        body: &'a [&'a Stmt<'a>],
        condition: &'a Expr<'a>,
    },
    For {
        init: Option<&'a Stmt<'a>>,
        condition: Option<&'a Expr<'a>>,
        next: Option<&'a Expr<'a>>,
        body: &'a [&'a Stmt<'a>],
    },
    Break,
    Continue,
    Return(Option<&'a Expr<'a>>),
}

/// One compilation unit: a function body plus the frame and scope facts
/// resolution already established.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FunctionLiteral<'a> {
    pub name: &'a str,
    /// Receiver included.
    pub parameter_count: u8,
    pub local_count: u16,
    pub language_mode: LanguageMode,
    /// Script-scope names this unit declares, in source order. Empty
    /// for ordinary functions.
    pub declared_globals: &'a [&'a str],
    pub body: &'a [&'a Stmt<'a>],
}
