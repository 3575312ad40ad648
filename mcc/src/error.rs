use std::error::Error as StdError;
use std::fmt;

/// A fatal compile diagnostic.
///
/// Formats as `<line>: <message>`; only the entry-point check carries no
/// line and prints bare. Compilation stops at the first error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    pub line: usize,
    pub kind: ErrorKind,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    UnexpectedEof,
    OpenParenExpected,
    CloseParenExpected,
    CloseBracketExpected,
    SemicolonExpected,
    ConditionalMissingColon,
    BadCast,
    BadExpression,
    BadFunctionCall,
    UndefinedVariable,
    BadDereference,
    BadAddressOf,
    BadLvalueInAssignment,
    BadLvalueInPreIncrement,
    BadLvalueInPostIncrement,
    PointerTypeExpected,
    BadEnumIdentifier,
    BadEnumInitializer,
    BadGlobalDeclaration,
    DuplicateGlobalDefinition,
    BadParameterDeclaration,
    DuplicateParameterDefinition,
    BadFunctionDefinition,
    BadLocalDeclaration,
    DuplicateLocalDefinition,
    MainNotDefined,
    Internal,
}

impl ErrorKind {
    fn message(self) -> &'static str {
        match self {
            ErrorKind::UnexpectedEof => "unexpected eof in expression",
            ErrorKind::OpenParenExpected => "open paren expected",
            ErrorKind::CloseParenExpected => "close paren expected",
            ErrorKind::CloseBracketExpected => "close bracket expected",
            ErrorKind::SemicolonExpected => "semicolon expected",
            ErrorKind::ConditionalMissingColon => "conditional missing colon",
            ErrorKind::BadCast => "bad cast",
            ErrorKind::BadExpression => "bad expression",
            ErrorKind::BadFunctionCall => "bad function call",
            ErrorKind::UndefinedVariable => "undefined variable",
            ErrorKind::BadDereference => "bad dereference",
            ErrorKind::BadAddressOf => "bad address-of",
            ErrorKind::BadLvalueInAssignment => "bad lvalue in assignment",
            ErrorKind::BadLvalueInPreIncrement => "bad lvalue in pre-increment",
            ErrorKind::BadLvalueInPostIncrement => "bad lvalue in post-increment",
            ErrorKind::PointerTypeExpected => "pointer type expected",
            ErrorKind::BadEnumIdentifier => "bad enum identifier",
            ErrorKind::BadEnumInitializer => "bad enum initializer",
            ErrorKind::BadGlobalDeclaration => "bad global declaration",
            ErrorKind::DuplicateGlobalDefinition => "duplicate global definition",
            ErrorKind::BadParameterDeclaration => "bad parameter declaration",
            ErrorKind::DuplicateParameterDefinition => "duplicate parameter definition",
            ErrorKind::BadFunctionDefinition => "bad function definition",
            ErrorKind::BadLocalDeclaration => "bad local declaration",
            ErrorKind::DuplicateLocalDefinition => "duplicate local definition",
            ErrorKind::MainNotDefined => "main() not defined",
            ErrorKind::Internal => "compiler error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.kind == ErrorKind::MainNotDefined {
            f.write_str(self.kind.message())
        } else {
            write!(f, "{}: {}", self.line, self.kind.message())
        }
    }
}

impl StdError for Error {}
