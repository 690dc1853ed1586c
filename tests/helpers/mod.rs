#![allow(dead_code)]

use async_trait::async_trait;
use gitmate::exec::{Executor, ProcessSpawner, SpawnOutcome};
use gitmate::llm::{LLMError, TextGenerator};
use gitmate::prompt::{PromptError, Prompter};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Scripted answer for the next prompt
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Select(usize),
    Input(String),
}

#[derive(Default)]
struct PromptState {
    answers: VecDeque<Answer>,
    questions: Vec<String>,
}

/// Prompter that replays scripted answers and records every question
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    state: Arc<Mutex<PromptState>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            state: Arc::new(Mutex::new(PromptState {
                answers: answers.into(),
                questions: Vec::new(),
            })),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.state.lock().unwrap().questions.clone()
    }

    pub fn remaining(&self) -> usize {
        self.state.lock().unwrap().answers.len()
    }

    fn next(&self, question: &str) -> Option<Answer> {
        let mut state = self.state.lock().unwrap();
        state.questions.push(question.to_string());
        state.answers.pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, _default: bool) -> Result<bool, PromptError> {
        match self.next(question) {
            Some(Answer::Confirm(answer)) => Ok(answer),
            _ => Err(PromptError::NoAnswer(question.to_string())),
        }
    }

    fn select(&self, question: &str, items: &[String], _default: usize) -> Result<usize, PromptError> {
        match self.next(question) {
            Some(Answer::Select(index)) if index < items.len() => Ok(index),
            _ => Err(PromptError::NoAnswer(question.to_string())),
        }
    }

    fn input(&self, question: &str) -> Result<String, PromptError> {
        match self.next(question) {
            Some(Answer::Input(text)) => Ok(text),
            _ => Err(PromptError::NoAnswer(question.to_string())),
        }
    }
}

#[derive(Default)]
struct SpawnState {
    calls: Vec<String>,
    started: Vec<Instant>,
    failing: Vec<(String, String)>,
}

/// Spawner that records command lines instead of running them
#[derive(Clone, Default)]
pub struct RecordingSpawner {
    state: Arc<Mutex<SpawnState>>,
}

impl RecordingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given command line exit with code 1 and `stderr`
    pub fn fail_on(self, command: &str, stderr: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing
            .push((command.to_string(), stderr.to_string()));
        self
    }

    /// Command lines spawned so far, re-joined with single spaces
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// When each spawn happened, in call order
    pub fn spawn_times(&self) -> Vec<Instant> {
        self.state.lock().unwrap().started.clone()
    }
}

impl ProcessSpawner for RecordingSpawner {
    fn spawn(&self, program: &str, args: &[String]) -> io::Result<SpawnOutcome> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }

        let mut state = self.state.lock().unwrap();
        state.calls.push(line.clone());
        state.started.push(Instant::now());

        if program == "missing-tool" {
            return Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
        }

        match state.failing.iter().find(|(command, _)| *command == line) {
            Some((_, stderr)) => Ok(SpawnOutcome::failure(1, stderr.clone())),
            None => Ok(SpawnOutcome::success()),
        }
    }
}

#[derive(Default)]
struct GeneratorState {
    responses: VecDeque<Result<String, String>>,
    prompts: Vec<String>,
}

/// Generator that returns canned responses in order
#[derive(Clone, Default)]
pub struct CannedGenerator {
    state: Arc<Mutex<GeneratorState>>,
}

impl CannedGenerator {
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            state: Arc::new(Mutex::new(GeneratorState {
                responses: responses.into_iter().map(|r| Ok(r.to_string())).collect(),
                prompts: Vec::new(),
            })),
        }
    }

    /// A generator whose every call fails
    pub fn failing(message: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(GeneratorState {
                responses: vec![Err(message.to_string())].into(),
                prompts: Vec::new(),
            })),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().prompts.len()
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.prompts.push(prompt.to_string());
            state.responses.pop_front()
        };

        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LLMError::ApiError(message)),
            None => Err(LLMError::ApiError("no canned response left".to_string())),
        }
    }
}

/// Executor wired to test doubles, without recovery and with no step delay
pub fn test_executor(spawner: &RecordingSpawner, prompter: &ScriptedPrompter) -> Executor {
    Executor::new(Box::new(spawner.clone()), Box::new(prompter.clone())).with_step_delay(Duration::ZERO)
}

pub fn commands(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}
