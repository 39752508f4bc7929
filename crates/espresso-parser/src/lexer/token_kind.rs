/// The kind of a [`Token`].
///
/// Keyword identity is decided on the token's *decoded* text, so an
/// identifier written with Unicode escapes still becomes a keyword per
/// JLS §3.3. `true`, `false` and `null` are literal kinds, not keywords.
/// Contextual keywords get their own kinds here; the parser accepts
/// them as identifiers wherever the grammar allows.
///
/// [`Token`]: crate::Token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LParen,     // (
    RParen,     // )
    LBrace,     // {
    RBrace,     // }
    LBracket,   // [
    RBracket,   // ]
    Semicolon,  // ;
    Comma,      // ,
    Dot,        // .
    Ellipsis,   // ...
    At,         // @
    ColonColon, // ::

    // Operators
    Eq,       // =
    Gt,       // >
    Lt,       // <
    Bang,     // !
    Tilde,    // ~
    Question, // ?
    Colon,    // :
    Arrow,    // ->
    EqEq,     // ==
    Ge,       // >=
    Le,       // <=
    NotEq,    // !=
    AmpAmp,   // &&
    PipePipe, // ||
    PlusPlus, // ++
    MinusMinus, // --
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Amp,      // &
    Pipe,     // |
    Caret,    // ^
    Percent,  // %
    Shl,      // <<
    Shr,      // >>
    Ushr,     // >>>
    PlusEq,   // +=
    MinusEq,  // -=
    StarEq,   // *=
    SlashEq,  // /=
    AmpEq,    // &=
    PipeEq,   // |=
    CaretEq,  // ^=
    PercentEq, // %=
    ShlEq,    // <<=
    ShrEq,    // >>=
    UshrEq,   // >>>=

    // Reserved keywords, JLS §3.9
    AbstractKw,
    AssertKw,
    BooleanKw,
    BreakKw,
    ByteKw,
    CaseKw,
    CatchKw,
    CharKw,
    ClassKw,
    ConstKw,
    ContinueKw,
    DefaultKw,
    DoKw,
    DoubleKw,
    ElseKw,
    EnumKw,
    ExtendsKw,
    FinalKw,
    FinallyKw,
    FloatKw,
    ForKw,
    GotoKw,
    IfKw,
    ImplementsKw,
    ImportKw,
    InstanceofKw,
    IntKw,
    InterfaceKw,
    LongKw,
    NativeKw,
    NewKw,
    PackageKw,
    PrivateKw,
    ProtectedKw,
    PublicKw,
    ReturnKw,
    ShortKw,
    StaticKw,
    StrictfpKw,
    SuperKw,
    SwitchKw,
    SynchronizedKw,
    ThisKw,
    ThrowKw,
    ThrowsKw,
    TransientKw,
    TryKw,
    VoidKw,
    VolatileKw,
    WhileKw,
    UnderscoreKw,

    // Contextual keywords
    VarKw,
    YieldKw,
    RecordKw,
    ModuleKw,
    OpenKw,
    ToKw,
    RequiresKw,
    ExportsKw,
    OpensKw,
    UsesKw,
    ProvidesKw,
    WithKw,
    TransitiveKw,
    SealedKw,
    PermitsKw,
    NonSealedKw,
    WhenKw,

    // Literals
    IntLiteral,
    LongLiteral,
    FloatLiteral,
    DoubleLiteral,
    CharLiteral,
    StringLiteral,
    TextBlock,
    TrueLiteral,
    FalseLiteral,
    NullLiteral,

    // Comments
    LineComment,
    BlockComment,
    DocComment,
    MarkdownComment,

    Identifier,
    Eof,
}

impl TokenKind {
    /// Look up the kind for a keyword, contextual keyword or word
    /// literal. `non-sealed` never goes through here — the hyphen makes
    /// it unreachable by identifier scanning, so the lexer special-cases
    /// it.
    pub fn from_keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "abstract" => TokenKind::AbstractKw,
            "assert" => TokenKind::AssertKw,
            "boolean" => TokenKind::BooleanKw,
            "break" => TokenKind::BreakKw,
            "byte" => TokenKind::ByteKw,
            "case" => TokenKind::CaseKw,
            "catch" => TokenKind::CatchKw,
            "char" => TokenKind::CharKw,
            "class" => TokenKind::ClassKw,
            "const" => TokenKind::ConstKw,
            "continue" => TokenKind::ContinueKw,
            "default" => TokenKind::DefaultKw,
            "do" => TokenKind::DoKw,
            "double" => TokenKind::DoubleKw,
            "else" => TokenKind::ElseKw,
            "enum" => TokenKind::EnumKw,
            "extends" => TokenKind::ExtendsKw,
            "final" => TokenKind::FinalKw,
            "finally" => TokenKind::FinallyKw,
            "float" => TokenKind::FloatKw,
            "for" => TokenKind::ForKw,
            "goto" => TokenKind::GotoKw,
            "if" => TokenKind::IfKw,
            "implements" => TokenKind::ImplementsKw,
            "import" => TokenKind::ImportKw,
            "instanceof" => TokenKind::InstanceofKw,
            "int" => TokenKind::IntKw,
            "interface" => TokenKind::InterfaceKw,
            "long" => TokenKind::LongKw,
            "native" => TokenKind::NativeKw,
            "new" => TokenKind::NewKw,
            "package" => TokenKind::PackageKw,
            "private" => TokenKind::PrivateKw,
            "protected" => TokenKind::ProtectedKw,
            "public" => TokenKind::PublicKw,
            "return" => TokenKind::ReturnKw,
            "short" => TokenKind::ShortKw,
            "static" => TokenKind::StaticKw,
            "strictfp" => TokenKind::StrictfpKw,
            "super" => TokenKind::SuperKw,
            "switch" => TokenKind::SwitchKw,
            "synchronized" => TokenKind::SynchronizedKw,
            "this" => TokenKind::ThisKw,
            "throw" => TokenKind::ThrowKw,
            "throws" => TokenKind::ThrowsKw,
            "transient" => TokenKind::TransientKw,
            "try" => TokenKind::TryKw,
            "void" => TokenKind::VoidKw,
            "volatile" => TokenKind::VolatileKw,
            "while" => TokenKind::WhileKw,
            "_" => TokenKind::UnderscoreKw,

            "var" => TokenKind::VarKw,
            "yield" => TokenKind::YieldKw,
            "record" => TokenKind::RecordKw,
            "module" => TokenKind::ModuleKw,
            "open" => TokenKind::OpenKw,
            "to" => TokenKind::ToKw,
            "requires" => TokenKind::RequiresKw,
            "exports" => TokenKind::ExportsKw,
            "opens" => TokenKind::OpensKw,
            "uses" => TokenKind::UsesKw,
            "provides" => TokenKind::ProvidesKw,
            "with" => TokenKind::WithKw,
            "transitive" => TokenKind::TransitiveKw,
            "sealed" => TokenKind::SealedKw,
            "permits" => TokenKind::PermitsKw,
            "when" => TokenKind::WhenKw,

            "true" => TokenKind::TrueLiteral,
            "false" => TokenKind::FalseLiteral,
            "null" => TokenKind::NullLiteral,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::LineComment
                | TokenKind::BlockComment
                | TokenKind::DocComment
                | TokenKind::MarkdownComment
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::LongLiteral
                | TokenKind::FloatLiteral
                | TokenKind::DoubleLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::TextBlock
                | TokenKind::TrueLiteral
                | TokenKind::FalseLiteral
                | TokenKind::NullLiteral
        )
    }

    /// Contextual keywords double as identifiers anywhere the grammar
    /// does not give them their special meaning.
    pub fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::VarKw
                | TokenKind::YieldKw
                | TokenKind::RecordKw
                | TokenKind::ModuleKw
                | TokenKind::OpenKw
                | TokenKind::ToKw
                | TokenKind::RequiresKw
                | TokenKind::ExportsKw
                | TokenKind::OpensKw
                | TokenKind::UsesKw
                | TokenKind::ProvidesKw
                | TokenKind::WithKw
                | TokenKind::TransitiveKw
                | TokenKind::SealedKw
                | TokenKind::PermitsKw
                | TokenKind::WhenKw
        )
    }

    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::BooleanKw
                | TokenKind::ByteKw
                | TokenKind::ShortKw
                | TokenKind::IntKw
                | TokenKind::LongKw
                | TokenKind::CharKw
                | TokenKind::FloatKw
                | TokenKind::DoubleKw
        )
    }

    /// Keywords (plus the two hyphen-free contextual ones) that may open
    /// a modifier list.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::PublicKw
                | TokenKind::ProtectedKw
                | TokenKind::PrivateKw
                | TokenKind::AbstractKw
                | TokenKind::StaticKw
                | TokenKind::FinalKw
                | TokenKind::StrictfpKw
                | TokenKind::NativeKw
                | TokenKind::SynchronizedKw
                | TokenKind::TransientKw
                | TokenKind::VolatileKw
                | TokenKind::DefaultKw
                | TokenKind::SealedKw
                | TokenKind::NonSealedKw
        )
    }

    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
                | TokenKind::PercentEq
                | TokenKind::ShlEq
                | TokenKind::ShrEq
                | TokenKind::UshrEq
        )
    }

    /// Human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::At => "'@'",
            TokenKind::ColonColon => "'::'",
            TokenKind::Eq => "'='",
            TokenKind::Gt => "'>'",
            TokenKind::Lt => "'<'",
            TokenKind::Bang => "'!'",
            TokenKind::Tilde => "'~'",
            TokenKind::Question => "'?'",
            TokenKind::Colon => "':'",
            TokenKind::Arrow => "'->'",
            TokenKind::EqEq => "'=='",
            TokenKind::Ge => "'>='",
            TokenKind::Le => "'<='",
            TokenKind::NotEq => "'!='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Percent => "'%'",
            TokenKind::Shl => "'<<'",
            TokenKind::Shr => "'>>'",
            TokenKind::Ushr => "'>>>'",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::AmpEq => "'&='",
            TokenKind::PipeEq => "'|='",
            TokenKind::CaretEq => "'^='",
            TokenKind::PercentEq => "'%='",
            TokenKind::ShlEq => "'<<='",
            TokenKind::ShrEq => "'>>='",
            TokenKind::UshrEq => "'>>>='",
            TokenKind::AbstractKw => "'abstract'",
            TokenKind::AssertKw => "'assert'",
            TokenKind::BooleanKw => "'boolean'",
            TokenKind::BreakKw => "'break'",
            TokenKind::ByteKw => "'byte'",
            TokenKind::CaseKw => "'case'",
            TokenKind::CatchKw => "'catch'",
            TokenKind::CharKw => "'char'",
            TokenKind::ClassKw => "'class'",
            TokenKind::ConstKw => "'const'",
            TokenKind::ContinueKw => "'continue'",
            TokenKind::DefaultKw => "'default'",
            TokenKind::DoKw => "'do'",
            TokenKind::DoubleKw => "'double'",
            TokenKind::ElseKw => "'else'",
            TokenKind::EnumKw => "'enum'",
            TokenKind::ExtendsKw => "'extends'",
            TokenKind::FinalKw => "'final'",
            TokenKind::FinallyKw => "'finally'",
            TokenKind::FloatKw => "'float'",
            TokenKind::ForKw => "'for'",
            TokenKind::GotoKw => "'goto'",
            TokenKind::IfKw => "'if'",
            TokenKind::ImplementsKw => "'implements'",
            TokenKind::ImportKw => "'import'",
            TokenKind::InstanceofKw => "'instanceof'",
            TokenKind::IntKw => "'int'",
            TokenKind::InterfaceKw => "'interface'",
            TokenKind::LongKw => "'long'",
            TokenKind::NativeKw => "'native'",
            TokenKind::NewKw => "'new'",
            TokenKind::PackageKw => "'package'",
            TokenKind::PrivateKw => "'private'",
            TokenKind::ProtectedKw => "'protected'",
            TokenKind::PublicKw => "'public'",
            TokenKind::ReturnKw => "'return'",
            TokenKind::ShortKw => "'short'",
            TokenKind::StaticKw => "'static'",
            TokenKind::StrictfpKw => "'strictfp'",
            TokenKind::SuperKw => "'super'",
            TokenKind::SwitchKw => "'switch'",
            TokenKind::SynchronizedKw => "'synchronized'",
            TokenKind::ThisKw => "'this'",
            TokenKind::ThrowKw => "'throw'",
            TokenKind::ThrowsKw => "'throws'",
            TokenKind::TransientKw => "'transient'",
            TokenKind::TryKw => "'try'",
            TokenKind::VoidKw => "'void'",
            TokenKind::VolatileKw => "'volatile'",
            TokenKind::WhileKw => "'while'",
            TokenKind::UnderscoreKw => "'_'",
            TokenKind::VarKw => "'var'",
            TokenKind::YieldKw => "'yield'",
            TokenKind::RecordKw => "'record'",
            TokenKind::ModuleKw => "'module'",
            TokenKind::OpenKw => "'open'",
            TokenKind::ToKw => "'to'",
            TokenKind::RequiresKw => "'requires'",
            TokenKind::ExportsKw => "'exports'",
            TokenKind::OpensKw => "'opens'",
            TokenKind::UsesKw => "'uses'",
            TokenKind::ProvidesKw => "'provides'",
            TokenKind::WithKw => "'with'",
            TokenKind::TransitiveKw => "'transitive'",
            TokenKind::SealedKw => "'sealed'",
            TokenKind::PermitsKw => "'permits'",
            TokenKind::NonSealedKw => "'non-sealed'",
            TokenKind::WhenKw => "'when'",
            TokenKind::IntLiteral => "an integer literal",
            TokenKind::LongLiteral => "a long literal",
            TokenKind::FloatLiteral => "a float literal",
            TokenKind::DoubleLiteral => "a double literal",
            TokenKind::CharLiteral => "a character literal",
            TokenKind::StringLiteral => "a string literal",
            TokenKind::TextBlock => "a text block",
            TokenKind::TrueLiteral => "'true'",
            TokenKind::FalseLiteral => "'false'",
            TokenKind::NullLiteral => "'null'",
            TokenKind::LineComment => "a line comment",
            TokenKind::BlockComment => "a block comment",
            TokenKind::DocComment => "a doc comment",
            TokenKind::MarkdownComment => "a markdown doc comment",
            TokenKind::Identifier => "an identifier",
            TokenKind::Eof => "EOF",
        }
    }
}

/// Shorthand for punctuation, operator and keyword [`TokenKind`]s,
/// so grammar code can say `T![;]` instead of `TokenKind::Semicolon`.
#[macro_export]
macro_rules! T {
    ['('] => { $crate::TokenKind::LParen };
    [')'] => { $crate::TokenKind::RParen };
    ['{'] => { $crate::TokenKind::LBrace };
    ['}'] => { $crate::TokenKind::RBrace };
    ['['] => { $crate::TokenKind::LBracket };
    [']'] => { $crate::TokenKind::RBracket };
    [;] => { $crate::TokenKind::Semicolon };
    [,] => { $crate::TokenKind::Comma };
    [.] => { $crate::TokenKind::Dot };
    [...] => { $crate::TokenKind::Ellipsis };
    [@] => { $crate::TokenKind::At };
    [::] => { $crate::TokenKind::ColonColon };
    [=] => { $crate::TokenKind::Eq };
    [>] => { $crate::TokenKind::Gt };
    [<] => { $crate::TokenKind::Lt };
    [!] => { $crate::TokenKind::Bang };
    [~] => { $crate::TokenKind::Tilde };
    [?] => { $crate::TokenKind::Question };
    [:] => { $crate::TokenKind::Colon };
    [->] => { $crate::TokenKind::Arrow };
    [==] => { $crate::TokenKind::EqEq };
    [>=] => { $crate::TokenKind::Ge };
    [<=] => { $crate::TokenKind::Le };
    [!=] => { $crate::TokenKind::NotEq };
    [&&] => { $crate::TokenKind::AmpAmp };
    [||] => { $crate::TokenKind::PipePipe };
    [++] => { $crate::TokenKind::PlusPlus };
    [--] => { $crate::TokenKind::MinusMinus };
    [+] => { $crate::TokenKind::Plus };
    [-] => { $crate::TokenKind::Minus };
    [*] => { $crate::TokenKind::Star };
    [/] => { $crate::TokenKind::Slash };
    [&] => { $crate::TokenKind::Amp };
    [|] => { $crate::TokenKind::Pipe };
    [^] => { $crate::TokenKind::Caret };
    [%] => { $crate::TokenKind::Percent };
    [<<] => { $crate::TokenKind::Shl };
    [>>] => { $crate::TokenKind::Shr };
    [>>>] => { $crate::TokenKind::Ushr };
    [+=] => { $crate::TokenKind::PlusEq };
    [-=] => { $crate::TokenKind::MinusEq };
    [*=] => { $crate::TokenKind::StarEq };
    [/=] => { $crate::TokenKind::SlashEq };
    [&=] => { $crate::TokenKind::AmpEq };
    [|=] => { $crate::TokenKind::PipeEq };
    [^=] => { $crate::TokenKind::CaretEq };
    [%=] => { $crate::TokenKind::PercentEq };
    [<<=] => { $crate::TokenKind::ShlEq };
    [>>=] => { $crate::TokenKind::ShrEq };
    [>>>=] => { $crate::TokenKind::UshrEq };
    [abstract] => { $crate::TokenKind::AbstractKw };
    [assert] => { $crate::TokenKind::AssertKw };
    [boolean] => { $crate::TokenKind::BooleanKw };
    [break] => { $crate::TokenKind::BreakKw };
    [byte] => { $crate::TokenKind::ByteKw };
    [case] => { $crate::TokenKind::CaseKw };
    [catch] => { $crate::TokenKind::CatchKw };
    [char] => { $crate::TokenKind::CharKw };
    [class] => { $crate::TokenKind::ClassKw };
    [const] => { $crate::TokenKind::ConstKw };
    [continue] => { $crate::TokenKind::ContinueKw };
    [default] => { $crate::TokenKind::DefaultKw };
    [do] => { $crate::TokenKind::DoKw };
    [double] => { $crate::TokenKind::DoubleKw };
    [else] => { $crate::TokenKind::ElseKw };
    [enum] => { $crate::TokenKind::EnumKw };
    [extends] => { $crate::TokenKind::ExtendsKw };
    [final] => { $crate::TokenKind::FinalKw };
    [finally] => { $crate::TokenKind::FinallyKw };
    [float] => { $crate::TokenKind::FloatKw };
    [for] => { $crate::TokenKind::ForKw };
    [goto] => { $crate::TokenKind::GotoKw };
    [if] => { $crate::TokenKind::IfKw };
    [implements] => { $crate::TokenKind::ImplementsKw };
    [import] => { $crate::TokenKind::ImportKw };
    [instanceof] => { $crate::TokenKind::InstanceofKw };
    [int] => { $crate::TokenKind::IntKw };
    [interface] => { $crate::TokenKind::InterfaceKw };
    [long] => { $crate::TokenKind::LongKw };
    [native] => { $crate::TokenKind::NativeKw };
    [new] => { $crate::TokenKind::NewKw };
    [package] => { $crate::TokenKind::PackageKw };
    [private] => { $crate::TokenKind::PrivateKw };
    [protected] => { $crate::TokenKind::ProtectedKw };
    [public] => { $crate::TokenKind::PublicKw };
    [return] => { $crate::TokenKind::ReturnKw };
    [short] => { $crate::TokenKind::ShortKw };
    [static] => { $crate::TokenKind::StaticKw };
    [strictfp] => { $crate::TokenKind::StrictfpKw };
    [super] => { $crate::TokenKind::SuperKw };
    [switch] => { $crate::TokenKind::SwitchKw };
    [synchronized] => { $crate::TokenKind::SynchronizedKw };
    [this] => { $crate::TokenKind::ThisKw };
    [throw] => { $crate::TokenKind::ThrowKw };
    [throws] => { $crate::TokenKind::ThrowsKw };
    [transient] => { $crate::TokenKind::TransientKw };
    [try] => { $crate::TokenKind::TryKw };
    [void] => { $crate::TokenKind::VoidKw };
    [volatile] => { $crate::TokenKind::VolatileKw };
    [while] => { $crate::TokenKind::WhileKw };
    [_] => { $crate::TokenKind::UnderscoreKw };
    [var] => { $crate::TokenKind::VarKw };
    [yield] => { $crate::TokenKind::YieldKw };
    [record] => { $crate::TokenKind::RecordKw };
    [module] => { $crate::TokenKind::ModuleKw };
    [open] => { $crate::TokenKind::OpenKw };
    [to] => { $crate::TokenKind::ToKw };
    [requires] => { $crate::TokenKind::RequiresKw };
    [exports] => { $crate::TokenKind::ExportsKw };
    [opens] => { $crate::TokenKind::OpensKw };
    [uses] => { $crate::TokenKind::UsesKw };
    [provides] => { $crate::TokenKind::ProvidesKw };
    [with] => { $crate::TokenKind::WithKw };
    [transitive] => { $crate::TokenKind::TransitiveKw };
    [sealed] => { $crate::TokenKind::SealedKw };
    [permits] => { $crate::TokenKind::PermitsKw };
    [non_sealed] => { $crate::TokenKind::NonSealedKw };
    [when] => { $crate::TokenKind::WhenKw };
    [true] => { $crate::TokenKind::TrueLiteral };
    [false] => { $crate::TokenKind::FalseLiteral };
    [null] => { $crate::TokenKind::NullLiteral };
    [ident] => { $crate::TokenKind::Identifier };
    [EOF] => { $crate::TokenKind::Eof };
}
