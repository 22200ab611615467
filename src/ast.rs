//! Typed syntax tree shared by the parser and the evaluator.
//!
//! Statements and expressions form two closed enums so the evaluator can
//! match every variant exhaustively. Every node keeps the token it was parsed
//! from for error reporting. The `Display` impls render the canonical,
//! fully-parenthesized source form used by the parser tests and by function
//! value formatting.

use std::fmt;

use crate::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
    While(WhileStatement),
    Function(FunctionStatement),
    Class(ClassStatement),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let(statement) => write!(f, "{statement}"),
            Self::Return(statement) => write!(f, "{statement}"),
            Self::Expression(statement) => write!(f, "{statement}"),
            Self::Block(statement) => write!(f, "{statement}"),
            Self::While(statement) => write!(f, "{statement}"),
            Self::Function(statement) => write!(f, "{statement}"),
            Self::Class(statement) => write!(f, "{statement}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Expression,
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "return {};", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub token: Token,
    pub condition: Expression,
    pub body: BlockStatement,
}

impl fmt::Display for WhileStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "while ({}) {{ {} }}", self.condition, self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatement {
    pub token: Token,
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl fmt::Display for FunctionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fn {}({}) {{ {} }}",
            self.name,
            join_identifiers(&self.parameters),
            self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassStatement {
    pub token: Token,
    pub name: Identifier,
    pub methods: Vec<FunctionStatement>,
}

impl fmt::Display for ClassStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {} {{ ", self.name)?;
        for method in &self.methods {
            write!(
                f,
                "{}({}) {{ {} }} ",
                method.name,
                join_identifiers(&method.parameters),
                method.body
            )?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer(IntegerLiteral),
    Str(StringLiteral),
    Boolean(BooleanLiteral),
    Identifier(Identifier),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Assign(AssignExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
    Get(GetExpression),
    Index(IndexExpression),
    List(ListLiteral),
    Map(MapLiteral),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(expression) => write!(f, "{expression}"),
            Self::Str(expression) => write!(f, "{expression}"),
            Self::Boolean(expression) => write!(f, "{expression}"),
            Self::Identifier(expression) => write!(f, "{expression}"),
            Self::Prefix(expression) => write!(f, "{expression}"),
            Self::Infix(expression) => write!(f, "{expression}"),
            Self::Assign(expression) => write!(f, "{expression}"),
            Self::If(expression) => write!(f, "{expression}"),
            Self::Function(expression) => write!(f, "{expression}"),
            Self::Call(expression) => write!(f, "{expression}"),
            Self::Get(expression) => write!(f, "{expression}"),
            Self::Index(expression) => write!(f, "{expression}"),
            Self::List(expression) => write!(f, "{expression}"),
            Self::Map(expression) => write!(f, "{expression}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpression {
    pub token: Token,
    pub target: Box<Expression>,
    pub value: Box<Expression>,
}

impl fmt::Display for AssignExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} = {})", self.target, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

impl fmt::Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if ({}) {{ {} }}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {{ {alternative} }}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fn({}) {{ {} }}",
            join_identifiers(&self.parameters),
            self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arguments = self
            .arguments
            .iter()
            .map(Expression::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.callee, arguments)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetExpression {
    pub token: Token,
    pub object: Box<Expression>,
    pub property: Identifier,
}

impl fmt::Display for GetExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}.{})", self.object, self.property)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub token: Token,
    pub container: Box<Expression>,
    pub index: Box<Expression>,
}

impl fmt::Display for IndexExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}[{}])", self.container, self.index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl fmt::Display for ListLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements = self
            .elements
            .iter()
            .map(Expression::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{elements}]")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLiteral {
    pub token: Token,
    pub entries: Vec<(Expression, Expression)>,
}

impl fmt::Display for MapLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{entries}}}")
    }
}

fn join_identifiers(identifiers: &[Identifier]) -> String {
    identifiers
        .iter()
        .map(|identifier| identifier.name.clone())
        .collect::<Vec<_>>()
        .join(", ")
}
