use crate::camera::Prompt;
use crate::error::{ErrorKind, Result};
use crate::journal::Journal;
use exn::ResultExt;
use picport_config::{CameraPrefix, Config};
use picport_naming::{Camera, sequence_prefix};
use std::collections::HashMap;

/// Maps an original filename to the [`Camera`] that took it.
///
/// Filenames starting with a known prefix resolve immediately. Anything else
/// goes to the operator through a [`Prompt`], who gets a bounded number of
/// attempts to answer with a valid identifier before the file is given up on.
///
/// Each unresolved file is asked about separately, unless
/// [`remember`](Self::remember) is enabled: then an answer is reused for every
/// later file sharing the same text before its sequence number (`DSC_` in
/// `DSC_4321.JPG`).
pub struct CameraResolver<P> {
    known: Vec<CameraPrefix>,
    prompt: P,
    max_attempts: u32,
    remember: bool,
    remembered: HashMap<String, Camera>,
}
impl<P: Prompt> CameraResolver<P> {
    /// Resolver with the built-in camera prefixes, five attempts, and no memory.
    pub fn new(prompt: P) -> Self {
        Self::from_config(prompt, &Config::default())
    }

    pub fn from_config(prompt: P, config: &Config) -> Self {
        Self {
            known: config.cameras.clone(),
            prompt,
            max_attempts: config.prompt_attempts.max(1),
            remember: config.remember_cameras,
            remembered: HashMap::new(),
        }
    }

    pub fn with_known(mut self, known: impl IntoIterator<Item = CameraPrefix>) -> Self {
        self.known = known.into_iter().collect();
        self
    }

    /// Clamped to at least one attempt.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    /// # Errors
    /// - [`ErrorKind::Prompt`] when the operator can't be asked (e.g. input closed).
    /// - [`ErrorKind::CameraUnresolved`] when every attempt was invalid.
    pub fn resolve(&mut self, filename: &str, journal: &mut Journal) -> Result<Camera> {
        if let Some(known) = self.known.iter().find(|known| filename.starts_with(&known.prefix)) {
            return Ok(known.camera);
        }

        let key = self.remember.then(|| sequence_prefix(filename).unwrap_or(filename).to_string());
        if let Some(camera) = key.as_ref().and_then(|key| self.remembered.get(key)) {
            journal.record(format!("Camera {camera} for {filename} (remembered)"));
            return Ok(*camera);
        }

        for attempt in 1..=self.max_attempts {
            let answer = self.prompt.ask(filename).or_raise(|| ErrorKind::Prompt(filename.to_string()))?;
            match answer.parse::<Camera>() {
                Ok(camera) => {
                    journal.record(format!("Camera {camera} for {filename}"));
                    if let Some(key) = key {
                        self.remembered.insert(key, camera);
                    }
                    return Ok(camera);
                },
                Err(_) => {
                    tracing::warn!(file = filename, attempt, answer = %answer, "Invalid camera identifier");
                    journal.record(format!(
                        "Invalid camera identifier {answer:?} for {filename} (attempt {attempt} of {})",
                        self.max_attempts
                    ));
                },
            }
        }
        exn::bail!(ErrorKind::CameraUnresolved {
            file: filename.to_string(),
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::ops::Deref;

    /// Answers from a script, counting how often it was asked.
    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
    }
    impl Scripted {
        fn new(answers: impl IntoIterator<Item = &'static str>) -> Self {
            Self { answers: answers.into_iter().collect(), asked: Vec::new() }
        }
    }
    impl Prompt for Scripted {
        fn ask(&mut self, filename: &str) -> io::Result<String> {
            self.asked.push(filename.to_string());
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    #[test]
    fn test_known_prefix_without_prompting() {
        let mut prompt = Scripted::default();
        let mut resolver = CameraResolver::new(&mut prompt);
        let mut journal = Journal::new();
        assert_eq!(resolver.resolve("ZP0_1234.NEF", &mut journal).unwrap(), Camera::NikonD90);
        drop(resolver);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_configured_prefixes() {
        let mut prompt = Scripted::default();
        let mut resolver = CameraResolver::new(&mut prompt)
            .with_known([CameraPrefix::new("DSC_", Camera::NikonD600), CameraPrefix::new("IMG_", Camera::CanonS95)]);
        let mut journal = Journal::new();
        assert_eq!(resolver.resolve("DSC_0001.JPG", &mut journal).unwrap(), Camera::NikonD600);
        assert_eq!(resolver.resolve("IMG_0001.JPG", &mut journal).unwrap(), Camera::CanonS95);
        // Defaults were replaced.
        assert!(resolver.resolve("ZP0_0001.JPG", &mut journal).is_err());
    }

    #[test]
    fn test_prompts_until_valid() {
        let mut prompt = Scripted::new(["x0", "d1", "v0"]);
        let mut resolver = CameraResolver::new(&mut prompt);
        let mut journal = Journal::new();
        assert_eq!(resolver.resolve("DSC_0001.JPG", &mut journal).unwrap(), Camera::Nikon1V1);
        drop(resolver);
        assert_eq!(prompt.asked.len(), 3);
        assert_eq!(
            journal.entries()[0],
            "Invalid camera identifier \"x0\" for DSC_0001.JPG (attempt 1 of 5)"
        );
        assert_eq!(journal.entries().last().unwrap(), "Camera v0 for DSC_0001.JPG");
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let mut prompt = Scripted::new(["nope", "still no", "d0"]);
        let mut resolver = CameraResolver::new(&mut prompt).with_max_attempts(2);
        let mut journal = Journal::new();
        let err = resolver.resolve("DSC_0001.JPG", &mut journal).unwrap_err();
        assert!(matches!(
            err.deref(),
            ErrorKind::CameraUnresolved { file, attempts: 2 } if file == "DSC_0001.JPG"
        ));
        drop(resolver);
        assert_eq!(prompt.asked.len(), 2);
    }

    #[test]
    fn test_closed_input_fails_the_file() {
        let mut prompt = Scripted::default();
        let mut resolver = CameraResolver::new(&mut prompt);
        let err = resolver.resolve("DSC_0001.JPG", &mut Journal::new()).unwrap_err();
        assert!(matches!(err.deref(), ErrorKind::Prompt(file) if file == "DSC_0001.JPG"));
    }

    #[test]
    fn test_asks_for_every_file_by_default() {
        let mut prompt = Scripted::new(["f0", "s0"]);
        let mut resolver = CameraResolver::new(&mut prompt);
        let mut journal = Journal::new();
        assert_eq!(resolver.resolve("DSC_0001.JPG", &mut journal).unwrap(), Camera::NikonD600);
        assert_eq!(resolver.resolve("DSC_0002.JPG", &mut journal).unwrap(), Camera::CanonS95);
        drop(resolver);
        assert_eq!(prompt.asked, vec!["DSC_0001.JPG", "DSC_0002.JPG"]);
    }

    #[test]
    fn test_remembers_answer_per_prefix() {
        let mut prompt = Scripted::new(["f0", "s0"]);
        let mut resolver = CameraResolver::new(&mut prompt).remember(true);
        let mut journal = Journal::new();
        assert_eq!(resolver.resolve("DSC_0001.JPG", &mut journal).unwrap(), Camera::NikonD600);
        assert_eq!(resolver.resolve("DSC_0002.NEF", &mut journal).unwrap(), Camera::NikonD600);
        assert_eq!(resolver.resolve("IMG_0003.JPG", &mut journal).unwrap(), Camera::CanonS95);
        drop(resolver);
        assert_eq!(prompt.asked, vec!["DSC_0001.JPG", "IMG_0003.JPG"]);
        assert!(journal.entries().contains(&"Camera f0 for DSC_0002.NEF (remembered)".to_string()));
    }
}
