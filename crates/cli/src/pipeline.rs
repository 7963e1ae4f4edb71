//! The compilation pipeline: read, lex, parse, analyze, generate, write.
//!
//! Each stage runs to completion before the next starts and the first
//! error aborts the run; nothing is written unless every class compiled.

use javelin_codegen::error::CodegenError;
use javelin_parser::ast::display::dump_program;
use javelin_parser::error::{ParseError, SemanticError};
use javelin_parser::{Lexer, Parser, SemanticAnalyzer};
use std::fs;
use std::path::{Path, PathBuf};

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug)]
pub enum PipelineError {
    Io(std::io::Error),
    Parse(ParseError),
    Semantic(SemanticError),
    Codegen(CodegenError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Io(e) => write!(f, "{e}"),
            PipelineError::Parse(e) => write!(f, "{e}"),
            PipelineError::Semantic(e) => write!(f, "{e}"),
            PipelineError::Codegen(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        PipelineError::Io(error)
    }
}

impl From<ParseError> for PipelineError {
    fn from(error: ParseError) -> Self {
        PipelineError::Parse(error)
    }
}

impl From<SemanticError> for PipelineError {
    fn from(error: SemanticError) -> Self {
        PipelineError::Semantic(error)
    }
}

impl From<CodegenError> for PipelineError {
    fn from(error: CodegenError) -> Self {
        PipelineError::Codegen(error)
    }
}

/// Everything the pipeline needs besides the input path.
#[derive(Debug, Clone)]
pub struct Options {
    pub output: PathBuf,
    pub verbose: bool,
    pub tokens: bool,
    pub ast: bool,
    pub ir: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            output: PathBuf::from("."),
            verbose: false,
            tokens: false,
            ast: false,
            ir: false,
        }
    }
}

/// Compile one source file. Returns the paths of the written class files,
/// in declaration order.
pub fn compile_file(path: &Path, options: &Options) -> PipelineResult<Vec<PathBuf>> {
    let log = |message: &str| {
        if options.verbose {
            println!("{message}");
        }
    };

    log(&format!("compiling {}", path.display()));
    let source = fs::read_to_string(path)?;

    let tokens = Lexer::new(&source).tokenize();
    log(&format!("lexer: {} tokens", tokens.len()));
    if options.tokens {
        for token in &tokens {
            println!("{token}");
        }
    }

    let program = Parser::new(tokens).parse_program()?;
    log(&format!("parser: {} classes", program.classes.len()));
    if options.ast {
        print!("{}", dump_program(&program));
    }

    let types = SemanticAnalyzer::new().analyze(&program)?;
    log(&format!("analyzer: {} expressions typed", types.len()));

    if options.ir {
        for instruction in javelin_codegen::generate_ir(&program) {
            println!("{instruction}");
        }
    }

    let classes = javelin_codegen::generate(&program, &types)?;
    fs::create_dir_all(&options.output)?;

    let mut written = Vec::with_capacity(classes.len());
    for (name, bytes) in &classes {
        let target = options.output.join(format!("{name}.class"));
        fs::write(&target, bytes)?;
        log(&format!("wrote {}", target.display()));
        written.push(target);
    }

    Ok(written)
}
