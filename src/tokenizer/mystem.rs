// File: src/tokenizer/mystem.rs
//! Lemmatizing tokenizer backed by the external `mystem` analyser.

use super::{count_token, Tokenizer};
use crate::core::types::WordCounts;
use crate::error::TokenizeError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// Runs `mystem -n -l` once per call: text goes in on stdin, one
/// `lemma|lemma?` line per input word comes back on stdout.
#[derive(Debug, Clone)]
pub struct MystemTokenizer {
    bin_path: PathBuf,
}

impl MystemTokenizer {
    pub fn new(bin_path: impl Into<PathBuf>) -> Self {
        Self {
            bin_path: bin_path.into(),
        }
    }

    pub fn bin_path(&self) -> &Path {
        &self.bin_path
    }

    fn run(&self, text: &str) -> Result<String, TokenizeError> {
        let mut command = Command::new(&self.bin_path);
        command
            .args(["-n", "-l"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Keep terminal signals aimed at the service away from the analyser.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|source| TokenizeError::Spawn {
            bin: self.bin_path.clone(),
            source,
        })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            TokenizeError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "tokenizer stdin unavailable",
            ))
        })?;
        let input = text.to_owned();
        // Feed stdin from another thread so a full stdout pipe cannot stall us.
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer.join().unwrap_or_else(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "tokenizer stdin writer panicked",
            ))
        });

        // A process that dies early also breaks the pipe; report the exit first.
        if !output.status.success() {
            return Err(TokenizeError::Exit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written?;

        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Counts the lemmas in mystem's `-n -l` output.
pub fn parse_output(output: &str) -> WordCounts {
    let mut counts = WordCounts::new();
    for line in output.lines() {
        for lemma in line.split('|') {
            count_token(&mut counts, lemma.trim_end_matches('?'));
        }
    }
    counts
}

impl Tokenizer for MystemTokenizer {
    fn tokenize(&self, text: &str) -> Result<WordCounts, TokenizeError> {
        if text.is_empty() {
            return Ok(WordCounts::new());
        }

        let output = self.run(text)?;
        let counts = parse_output(&output);
        tracing::trace!(
            bin = %self.bin_path.display(),
            text_len = text.len(),
            distinct = counts.len(),
            "mystem.tokenize"
        );
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_alternatives_and_uncertain_lemmas() {
        let output = "Мама|мама\nмыть\nрама?\nи\nГлокая?|глокий?\n";
        let counts = parse_output(output);

        assert_eq!(
            counts,
            WordCounts::from([
                ("глокая".to_string(), 1),
                ("глокий".to_string(), 1),
                ("мама".to_string(), 2),
                ("мыть".to_string(), 1),
                ("рама".to_string(), 1),
            ])
        );
    }

    #[test]
    fn empty_text_does_not_spawn() {
        let tokenizer = MystemTokenizer::new("/nonexistent/mystem");
        assert!(tokenizer.tokenize("").unwrap().is_empty());
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let tokenizer = MystemTokenizer::new("/nonexistent/mystem");
        let err = tokenizer.tokenize("текст").unwrap_err();
        assert!(matches!(err, TokenizeError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn failing_process_is_exit_error() {
        let tokenizer = MystemTokenizer::new("false");
        let err = tokenizer.tokenize("текст").unwrap_err();
        assert!(matches!(err, TokenizeError::Exit { .. }), "{err}");
    }
}
