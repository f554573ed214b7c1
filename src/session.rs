//! Interactive console session.
//!
//! Reads one line at a time, forwards it to the completion requester and
//! prints the reply. Input and output are generic so the loop can be driven
//! from in-memory buffers.

use std::io::{self, BufRead, Write};

use crate::config::Messages;
use crate::model::{CompletionRequester, CompletionService};

/// A read-print loop around a [`CompletionRequester`].
pub struct ChatSession<S> {
    requester: CompletionRequester<S>,
    messages: &'static Messages,
}

impl<S: CompletionService> ChatSession<S> {
    /// Create a session. The requester should share the same message table.
    pub fn new(requester: CompletionRequester<S>, messages: &'static Messages) -> Self {
        Self {
            requester,
            messages,
        }
    }

    /// Answer a single prompt and write the labelled reply.
    pub async fn answer<W: Write>(&self, prompt: &str, output: &mut W) -> io::Result<()> {
        let reply = self.requester.request_completion(prompt).await;
        writeln!(output, "{}{}", self.messages.reply_label, reply)?;
        output.flush()
    }

    /// Run until the exit command or end of input.
    pub async fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", self.messages.banner)?;

        loop {
            write!(output, "{}", self.messages.prompt)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                writeln!(output, "{}", self.messages.farewell)?;
                break;
            }
            let prompt = line.trim_end_matches(['\r', '\n']);

            if self.messages.is_exit_command(prompt) {
                writeln!(output, "{}", self.messages.farewell)?;
                break;
            }

            self.answer(prompt, &mut output).await?;
        }

        output.flush()
    }
}
