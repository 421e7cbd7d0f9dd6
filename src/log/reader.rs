use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Compiler executables recognised in a text log.
pub const DEFAULT_COMPILERS: &[&str] = &["csc", "vbc"];

/// Leading bytes of a gzip stream; MSBuild binary logs start with these.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Errors raised while reading a build log
#[derive(Debug, Error)]
pub enum LogError {
    /// The log could not be found or read. Nothing is aggregated.
    #[error("Failed to read build log: {}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is an MSBuild binary log or another compressed format.
    #[error(
        "Unsupported build log format: {} is a compressed binary log, pass a text log",
        path.display()
    )]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid compiler name pattern")]
    InvalidPattern(#[from] regex::Error),
}

/// Producer of raw compiler command lines.
pub trait InvocationSource {
    /// Read every invocation. Called once, before aggregation starts.
    fn read_invocations(&self) -> Result<Vec<String>, LogError>;
}

/// Command lines that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct VecSource(pub Vec<String>);

impl InvocationSource for VecSource {
    fn read_invocations(&self) -> Result<Vec<String>, LogError> {
        Ok(self.0.clone())
    }
}

/// Reads compiler invocations from a plain-text MSBuild log.
///
/// A line counts as an invocation when it names a compiler executable
/// (`csc`, `csc.exe`, `"...\csc.dll"`, ...) followed by an argument that
/// starts with `/`, `-` or `@`. The line is returned trimmed; everything else
/// in the log is ignored.
#[derive(Debug, Clone)]
pub struct TextLogReader {
    path: PathBuf,
    pattern: Regex,
}

impl TextLogReader {
    /// Reader recognising [`DEFAULT_COMPILERS`].
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        Self::with_compilers(path, DEFAULT_COMPILERS)
    }

    /// Reader recognising the given compiler executable names (without extension).
    pub fn with_compilers<S: AsRef<str>>(
        path: impl Into<PathBuf>,
        compilers: &[S],
    ) -> Result<Self, LogError> {
        Ok(Self {
            path: path.into(),
            pattern: compiler_pattern(compilers)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extract invocation lines from log text
    pub fn parse(&self, content: &str) -> Vec<String> {
        let mut scanned = 0usize;
        let invocations: Vec<String> = content
            .lines()
            .inspect(|_| scanned += 1)
            .filter(|line| self.pattern.is_match(line))
            .map(|line| line.trim().to_string())
            .collect();

        tracing::debug!(
            "scanned {} lines, found {} compiler invocations",
            scanned,
            invocations.len()
        );
        invocations
    }
}

impl InvocationSource for TextLogReader {
    fn read_invocations(&self) -> Result<Vec<String>, LogError> {
        let bytes = fs::read(&self.path).map_err(|source| LogError::InputUnavailable {
            path: self.path.clone(),
            source,
        })?;

        if bytes.starts_with(&GZIP_MAGIC) {
            return Err(LogError::UnsupportedFormat {
                path: self.path.clone(),
            });
        }

        let content = String::from_utf8_lossy(&bytes);
        Ok(self.parse(&content))
    }
}

/// Build the regex matching a compiler executable token inside a log line.
fn compiler_pattern<S: AsRef<str>>(compilers: &[S]) -> Result<Regex, LogError> {
    let mut names: Vec<String> = compilers
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .map(regex::escape)
        .collect();

    if names.is_empty() {
        names = DEFAULT_COMPILERS.iter().map(|name| regex::escape(name)).collect();
    }

    let pattern = format!(
        r#"(?i)(?:^|[\s"\\/])(?:{})(?:\.exe|\.dll)?"?\s+[/@-]"#,
        names.join("|")
    );
    Ok(Regex::new(&pattern)?)
}
