//! Recording [`ToolRunner`] fake.

use async_trait::async_trait;
use parking_lot::Mutex;

use director_protocols::MediaError;

use crate::runner::ToolRunner;

pub(crate) struct FakeRunner {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeRunner {
    pub(crate) fn replying(stdout: &str) -> Self {
        Self {
            reply: Ok(stdout.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(stderr: &str) -> Self {
        Self {
            reply: Err(stderr.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ToolRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, MediaError> {
        self.calls.lock().push((program.to_string(), args.to_vec()));
        match &self.reply {
            Ok(stdout) => Ok(stdout.clone()),
            Err(stderr) => Err(MediaError::Failed {
                tool: program.to_string(),
                status: 1,
                stderr: stderr.clone(),
            }),
        }
    }
}
