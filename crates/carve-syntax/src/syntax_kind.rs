#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    AT,
    DOT,
    COLON,
    SEMICOLON,
    COMMA,
    PIPE,
    STAR,
    HASH,
    SLASH,
    BANG,
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    LEFT_BRACKET,
    RIGHT_BRACKET,

    MINUS,
    PLUS,
    PLUS_EQ,
    MINUS_EQ,
    EQ,
    EQ_EQ,
    FAT_ARROW,
    GT_EQ,
    LT_EQ,
    GT,
    LT,

    STRING,
    NUMBER,
    IDENT,

    DOUBLE_SLASH,
    BLOCK_COMMENT_START,
    BLOCK_COMMENT_END,

    WHITESPACE,
    TAB,
    NEWLINE,
    CARRIAGE_RETURN,

    EOF,

    COMPILATION_UNIT,
    USING,
    QUALIFIED_NAME,
    NAMESPACE,
    NAMESPACE_STATEMENT,

    CLASS,
    CLASS_STATEMENT,
    CLASS_INHERITANCE,
    CLASS_BLOCK,

    ACCESSOR,
    ABSTRACT,
    SEALED,
    STATIC,
    OVERRIDE,
    READONLY,
    VIRTUAL,
    CONST,
    EXTERN,
    OUT,
    REF,

    ATTRIBUTE,
    ATTRIBUTE_ARGS,

    FIELD,
    PROPERTY,
    METHOD,
    CTOR,
    MEMBER_NAME,

    PARAM,
    PARAM_DEFAULT,

    TYPE,
    TUPLE_TYPE,
    GENERIC_ARGS,
    ARRAY_TYPE,

    FIELD_INITIALIZER,
    PROPERTY_BODY,
    METHOD_BODY,
    CTOR_INITIALIZER,

    COMMENT,
    COMMENT_TEXT,
    BLOCK_COMMENT,
}
