use matches::debug_assert_matches;

use mcvm::constants::WORD_BYTES;
use mcvm::{enum_to_word, Opcode, Program, Word};

use crate::error::{Error, ErrorKind};
use crate::symbol::{Class, SymbolTable};
use crate::token::Token;
use crate::types::Type;

const SEED_KEYWORDS: &str = "char else enum if int return sizeof while";
const SEED_BUILTINS: &str = "open read close printf malloc free memset memcmp exit";
const SEED_EXTRAS: &str = "void main";

/// The whole compilation context, threaded explicitly instead of living in
/// globals: source cursor and current token, symbol table, and the growing
/// code and data segments. The lexer half of the implementation lives in
/// `lexer.rs`, the expression emitter in `expr.rs`.
pub(crate) struct Compiler {
    pub(crate) src: Vec<u8>,
    pub(crate) pos: usize,
    pub(crate) line: usize,
    pub(crate) line_start: usize,
    pub(crate) tok: Token,
    pub(crate) ival: Word,
    pub(crate) sym: usize,
    pub(crate) table: SymbolTable,
    pub(crate) code: Vec<Word>,
    pub(crate) data: Vec<u8>,
    pub(crate) ty: Type,
    pub(crate) loc: Word,
    pub(crate) src_trace: bool,
    pub(crate) flushed: usize,
    main_sym: Option<usize>,
}

impl Compiler {
    pub(crate) fn new(src_trace: bool) -> Compiler {
        Compiler {
            src: Vec::new(),
            pos: 0,
            line: 1,
            line_start: 0,
            tok: Token::Eof,
            ival: 0,
            sym: 0,
            table: SymbolTable::new(),
            code: Vec::new(),
            // the first word is reserved so no object has address 0
            data: vec![0; WORD_BYTES],
            ty: Type::INT,
            loc: 0,
            src_trace,
            flushed: 0,
            main_sym: None,
        }
    }

    pub(crate) fn set_source(&mut self, source: &str) {
        self.src = source.as_bytes().to_vec();
        self.pos = 0;
        self.line = 1;
        self.line_start = 0;
    }

    /// Seeds the symbol table by feeding the keyword and built-in names
    /// through the lexer, then overwriting what it inserted: reserved words
    /// get their token class, built-ins become `Sys` entries carrying their
    /// opcode, `void` doubles as `char`, and the `main` entry is retained
    /// for the entry-point lookup.
    pub(crate) fn seed(&mut self) {
        self.set_source(SEED_KEYWORDS);
        let keywords = [
            Token::Char,
            Token::Else,
            Token::Enum,
            Token::If,
            Token::Int,
            Token::Return,
            Token::Sizeof,
            Token::While,
        ];
        for &keyword in keywords.iter() {
            self.next();
            self.table.get_mut(self.sym).tok = keyword;
        }

        self.set_source(SEED_BUILTINS);
        let builtins = [
            Opcode::OPEN,
            Opcode::READ,
            Opcode::CLOS,
            Opcode::PRTF,
            Opcode::MALC,
            Opcode::FREE,
            Opcode::MSET,
            Opcode::MCMP,
            Opcode::EXIT,
        ];
        for &builtin in builtins.iter() {
            self.next();
            let symbol = self.table.get_mut(self.sym);
            symbol.class = Some(Class::Sys);
            symbol.ty = Type::INT;
            symbol.value = enum_to_word(builtin);
        }

        self.set_source(SEED_EXTRAS);
        self.next();
        self.table.get_mut(self.sym).tok = Token::Char;
        self.next();
        self.main_sym = Some(self.sym);
    }

    pub(crate) fn parse(&mut self) -> Result<(), Error> {
        self.next();
        while self.tok != Token::Eof {
            self.declaration()?;
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<Program, Error> {
        let entry = self.main_sym.and_then(|index| {
            let symbol = self.table.get(index);
            if symbol.class == Some(Class::Fun) {
                Some(symbol.value as usize)
            } else {
                None
            }
        });
        match entry {
            Some(entry) => Ok(Program::from(self.code, self.data, entry)),
            None => Err(Error {
                line: 0,
                kind: ErrorKind::MainNotDefined,
            }),
        }
    }

    // ------------------------------------------------------------------
    // declarations
    // ------------------------------------------------------------------

    fn declaration(&mut self) -> Result<(), Error> {
        let mut base = Type::INT;
        match self.tok {
            Token::Int => self.next(),
            Token::Char => {
                self.next();
                base = Type::CHAR;
            }
            Token::Enum => {
                self.enum_declaration()?;
                if self.tok != Token::Mul && self.tok != Token::Id {
                    // the block was itself the whole declaration
                    return Ok(());
                }
            }
            _ => {}
        }
        while self.tok != Token::Semi && self.tok != Token::RBrace {
            let mut ty = base;
            while self.tok == Token::Mul {
                self.next();
                ty = ty.pointer_to();
            }
            if self.tok != Token::Id {
                return Err(self.error(ErrorKind::BadGlobalDeclaration));
            }
            let symbol = self.sym;
            if self.table.get(symbol).class.is_some() {
                return Err(self.error(ErrorKind::DuplicateGlobalDefinition));
            }
            self.next();
            self.table.get_mut(symbol).ty = ty;
            if self.tok == Token::LParen {
                self.function_definition(symbol)?;
            } else {
                let address = self.data.len() as Word;
                self.data.extend_from_slice(&[0; WORD_BYTES]);
                let entry = self.table.get_mut(symbol);
                entry.class = Some(Class::Glo);
                entry.value = address;
            }
            if self.tok == Token::Comma {
                self.next();
            }
        }
        self.next();
        Ok(())
    }

    fn enum_declaration(&mut self) -> Result<(), Error> {
        debug_assert_matches!(self.tok, Token::Enum);
        self.next();
        if self.tok != Token::LBrace {
            // skip the optional tag name
            self.next();
        }
        if self.tok == Token::LBrace {
            self.next();
            let mut value: Word = 0;
            while self.tok != Token::RBrace {
                if self.tok != Token::Id {
                    return Err(self.error(ErrorKind::BadEnumIdentifier));
                }
                let symbol = self.sym;
                self.next();
                if self.tok == Token::Assign {
                    self.next();
                    if self.tok != Token::Num {
                        return Err(self.error(ErrorKind::BadEnumInitializer));
                    }
                    value = self.ival;
                    self.next();
                }
                let entry = self.table.get_mut(symbol);
                entry.class = Some(Class::Num);
                entry.ty = Type::INT;
                entry.value = value;
                value += 1;
                if self.tok == Token::Comma {
                    self.next();
                }
            }
            self.next();
        }
        Ok(())
    }

    fn function_definition(&mut self, symbol: usize) -> Result<(), Error> {
        {
            let entry = self.table.get_mut(symbol);
            entry.class = Some(Class::Fun);
            entry.value = self.code.len() as Word;
        }
        self.next(); // '('
        let mut index: Word = 0;
        while self.tok != Token::RParen {
            let mut ty = Type::INT;
            if self.tok == Token::Int {
                self.next();
            } else if self.tok == Token::Char {
                self.next();
                ty = Type::CHAR;
            }
            while self.tok == Token::Mul {
                self.next();
                ty = ty.pointer_to();
            }
            if self.tok != Token::Id {
                return Err(self.error(ErrorKind::BadParameterDeclaration));
            }
            let param = self.sym;
            if self.table.get(param).class == Some(Class::Loc) {
                return Err(self.error(ErrorKind::DuplicateParameterDefinition));
            }
            self.table.shadow(param, Class::Loc, ty, index);
            index += 1;
            self.next();
            if self.tok == Token::Comma {
                self.next();
            }
        }
        self.next(); // ')'
        if self.tok != Token::LBrace {
            return Err(self.error(ErrorKind::BadFunctionDefinition));
        }
        index += 1;
        self.loc = index;
        self.next();

        // leading locals, no initializers
        while self.tok == Token::Int || self.tok == Token::Char {
            let base = if self.tok == Token::Int {
                Type::INT
            } else {
                Type::CHAR
            };
            self.next();
            while self.tok != Token::Semi {
                let mut ty = base;
                while self.tok == Token::Mul {
                    self.next();
                    ty = ty.pointer_to();
                }
                if self.tok != Token::Id {
                    return Err(self.error(ErrorKind::BadLocalDeclaration));
                }
                let local = self.sym;
                if self.table.get(local).class == Some(Class::Loc) {
                    return Err(self.error(ErrorKind::DuplicateLocalDefinition));
                }
                index += 1;
                self.table.shadow(local, Class::Loc, ty, index);
                self.next();
                if self.tok == Token::Comma {
                    self.next();
                }
            }
            self.next(); // ';'
        }

        self.emit_op(Opcode::ENT);
        self.emit(index - self.loc);
        while self.tok != Token::RBrace {
            self.statement()?;
        }
        self.emit_op(Opcode::LEV);
        // the body's '}' is consumed by the declaration loop

        self.table.unshadow_locals();
        Ok(())
    }

    // ------------------------------------------------------------------
    // statements
    // ------------------------------------------------------------------

    fn statement(&mut self) -> Result<(), Error> {
        match self.tok {
            Token::If => {
                self.next();
                self.expect(Token::LParen, ErrorKind::OpenParenExpected)?;
                self.expr(Token::Assign)?;
                self.expect(Token::RParen, ErrorKind::CloseParenExpected)?;
                self.emit_op(Opcode::BZ);
                let mut branch = self.emit(0);
                self.statement()?;
                if self.tok == Token::Else {
                    self.patch(branch, self.here() + 2);
                    self.emit_op(Opcode::JMP);
                    branch = self.emit(0);
                    self.next();
                    self.statement()?;
                }
                self.patch(branch, self.here());
                Ok(())
            }
            Token::While => {
                self.next();
                let head = self.here();
                self.expect(Token::LParen, ErrorKind::OpenParenExpected)?;
                self.expr(Token::Assign)?;
                self.expect(Token::RParen, ErrorKind::CloseParenExpected)?;
                self.emit_op(Opcode::BZ);
                let branch = self.emit(0);
                self.statement()?;
                self.emit_op(Opcode::JMP);
                self.emit(head as Word);
                self.patch(branch, self.here());
                Ok(())
            }
            Token::Return => {
                self.next();
                if self.tok != Token::Semi {
                    self.expr(Token::Assign)?;
                }
                self.emit_op(Opcode::LEV);
                self.expect(Token::Semi, ErrorKind::SemicolonExpected)
            }
            Token::LBrace => {
                self.next();
                while self.tok != Token::RBrace {
                    self.statement()?;
                }
                self.next();
                Ok(())
            }
            Token::Semi => {
                self.next();
                Ok(())
            }
            _ => {
                self.expr(Token::Assign)?;
                self.expect(Token::Semi, ErrorKind::SemicolonExpected)
            }
        }
    }

    // ------------------------------------------------------------------
    // emission helpers
    // ------------------------------------------------------------------

    pub(crate) fn emit_op(&mut self, op: Opcode) {
        self.code.push(enum_to_word(op));
    }

    /// Appends a raw word, returning its slot for later patch-back.
    pub(crate) fn emit(&mut self, word: Word) -> usize {
        self.code.push(word);
        self.code.len() - 1
    }

    pub(crate) fn here(&self) -> usize {
        self.code.len()
    }

    pub(crate) fn patch(&mut self, slot: usize, target: usize) {
        self.code[slot] = target as Word;
    }

    /// Returns the trailing `LC`/`LI` word if the last emission was a load.
    pub(crate) fn last_is_load(&self) -> Option<Word> {
        match self.code.last() {
            Some(&word)
                if word == enum_to_word(Opcode::LC) || word == enum_to_word(Opcode::LI) =>
            {
                Some(word)
            }
            _ => None,
        }
    }

    pub(crate) fn symbol_info(&self, index: usize) -> (Option<Class>, Type, Word) {
        let symbol = self.table.get(index);
        (symbol.class, symbol.ty, symbol.value)
    }

    pub(crate) fn error(&self, kind: ErrorKind) -> Error {
        Error {
            line: self.line,
            kind,
        }
    }

    pub(crate) fn expect(&mut self, tok: Token, kind: ErrorKind) -> Result<(), Error> {
        if self.tok == tok {
            self.next();
            Ok(())
        } else {
            Err(self.error(kind))
        }
    }
}
