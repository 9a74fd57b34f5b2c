//! System speech synthesizer backed by the `espeak-ng` executable

use super::capability::{Capability, SpeechSynthesizer, Utterance, Voice};
use crate::{BuddyError, Result};
use std::io::Write;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

/// Words per minute at rate 1.0
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

pub struct EspeakSynthesizer {
    program: String,
    voices: Vec<Voice>,
    current: Option<Child>,
}

impl EspeakSynthesizer {
    /// Look for a usable synthesizer, trying `program` first and then `espeak`
    pub fn probe(program: &str) -> Capability<Self> {
        let mut candidates = vec![program.to_string()];
        if program != "espeak" {
            candidates.push("espeak".to_string());
        }

        for candidate in candidates {
            match list_voices(&candidate) {
                Ok(voices) => {
                    info!("Found synthesizer {} with {} voices", candidate, voices.len());
                    return Capability::Available(Self {
                        program: candidate,
                        voices,
                        current: None,
                    });
                }
                Err(e) => debug!("Synthesizer {} not usable: {}", candidate, e),
            }
        }

        Capability::unavailable(format!("{} is not installed", program))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn reap(&mut self) {
        if let Some(mut child) = self.current.take() {
            match child.try_wait() {
                Ok(Some(_)) => {}
                _ => {
                    let _ = child.kill();
                    let _ = child.wait();
                }
            }
        }
    }
}

impl SpeechSynthesizer for EspeakSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        self.reap();

        let mut command = Command::new(&self.program);
        command.args(synth_args(utterance));
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = command
            .spawn()
            .map_err(|e| BuddyError::SynthesisError(format!("Failed to start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(utterance.text.as_bytes()) {
                warn!("Failed to hand text to {}: {}", self.program, e);
            }
        }

        debug!("Speaking {} chars", utterance.text.len());
        self.current = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        self.reap();
    }
}

impl Drop for EspeakSynthesizer {
    fn drop(&mut self) {
        self.reap();
    }
}

/// Command-line arguments for one utterance; text is read from stdin
fn synth_args(utterance: &Utterance) -> Vec<String> {
    let mut args = Vec::with_capacity(9);
    if let Some(voice) = &utterance.voice {
        args.push("-v".to_string());
        args.push(voice.id.clone());
    }

    let words_per_minute = (BASE_WORDS_PER_MINUTE * utterance.rate).round().clamp(80.0, 450.0);
    let pitch = (utterance.pitch * 50.0).round().clamp(0.0, 99.0);
    let amplitude = (utterance.volume * 100.0).round().clamp(0.0, 200.0);

    args.push("-s".to_string());
    args.push(format!("{}", words_per_minute as u32));
    args.push("-p".to_string());
    args.push(format!("{}", pitch as u32));
    args.push("-a".to_string());
    args.push(format!("{}", amplitude as u32));
    args.push("--stdin".to_string());
    args
}

fn list_voices(program: &str) -> std::io::Result<Vec<Voice>> {
    let output = Command::new(program)
        .arg("--voices")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("exited with {}", output.status),
        ));
    }

    Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  en-us           --/M      English_(America)  gmw/en-US           (en 2)
/// ```
pub fn parse_voice_list(table: &str) -> Vec<Voice> {
    table
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let mut columns = line.split_whitespace();
            let _priority = columns.next()?;
            let lang = columns.next()?;
            let _age_gender = columns.next()?;
            let name = columns.next()?;
            Some(Voice {
                id: lang.to_string(),
                name: name.replace('_', " "),
                lang: lang.to_string(),
            })
        })
        .collect()
}
