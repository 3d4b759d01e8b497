use anyhow::Result;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};

pub const PROMPT_TEXT: &str = "-> Press Enter to continue.";

/// Write the prompt and wait for a line (or EOF) on `reader`.
pub async fn prompt<R, W>(reader: &mut R, writer: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(PROMPT_TEXT.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(())
}

/// Pauses between demo steps.
///
/// One reader is kept for the whole run so lines typed ahead are consumed
/// by later pauses instead of being dropped.
pub struct Pause<R, W> {
    reader: R,
    writer: W,
    skip: bool,
}

impl Pause<BufReader<Stdin>, Stdout> {
    /// Pause on the terminal unless `skip` is set.
    pub fn terminal(skip: bool) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), skip)
    }
}

impl<R, W> Pause<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, skip: bool) -> Self {
        Self { reader, writer, skip }
    }

    pub async fn wait(&mut self) -> Result<()> {
        if self.skip {
            return Ok(());
        }
        prompt(&mut self.reader, &mut self.writer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prompt_writes_text_and_consumes_one_line() {
        let mut input: &[u8] = b"\nsecond\n";
        let mut output = Vec::new();

        prompt(&mut input, &mut output).await.unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), format!("{}\n", PROMPT_TEXT));
        assert_eq!(input, b"second\n");
    }

    #[tokio::test]
    async fn prompt_returns_on_eof() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        assert!(prompt(&mut input, &mut output).await.is_ok());
    }

    #[tokio::test]
    async fn typed_ahead_lines_serve_later_pauses() {
        let input: &[u8] = b"\n\n";
        let mut pause = Pause::new(BufReader::new(input), Vec::new(), false);

        pause.wait().await.unwrap();
        pause.wait().await.unwrap();

        let mut rest = String::new();
        pause.reader.read_line(&mut rest).await.unwrap();
        assert!(rest.is_empty());
        let written = String::from_utf8(pause.writer).unwrap();
        assert_eq!(written, format!("{0}\n{0}\n", PROMPT_TEXT));
    }

    #[tokio::test]
    async fn skipped_pause_neither_reads_nor_writes() {
        let input: &[u8] = b"keep\n";
        let mut pause = Pause::new(input, Vec::new(), true);

        pause.wait().await.unwrap();

        assert!(pause.writer.is_empty());
        assert_eq!(pause.reader, b"keep\n");
    }
}
