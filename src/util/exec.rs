use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// One blocking subprocess invocation: stdout captured (and optionally echoed), stderr inherited.
#[derive(Debug, Default)]
pub struct ExecRequest {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    env: Vec<(OsString, OsString)>,
    inherit_env: bool,
    echo_stdout: bool,
}

impl ExecRequest {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            inherit_env: true,
            echo_stdout: true,
            ..Self::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }

    pub fn echo_stdout(mut self, echo: bool) -> Self {
        self.echo_stdout = echo;
        self
    }

    /// Spawn, stream stdout into a buffer until EOF, then wait.
    pub fn run(self) -> io::Result<ExecOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        if !self.inherit_env {
            cmd.env_clear();
        }
        // Later entries win over the inherited environment.
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let mut child = cmd.spawn()?;
        let stdout = match child.stdout.take() {
            Some(pipe) => match read_stream(pipe, self.echo_stdout) {
                Ok(s) => s,
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e);
                }
            },
            None => String::new(),
        };
        let status = child.wait()?;
        Ok(ExecOutput {
            exit_code: status.code().unwrap_or(1),
            stdout,
        })
    }
}

/// Read `pipe` to EOF line by line, optionally echoing each line to our stdout.
fn read_stream<R: Read>(pipe: R, echo: bool) -> io::Result<String> {
    let mut reader = BufReader::new(pipe);
    let mut out = String::new();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        if echo {
            let mut lock = io::stdout().lock();
            let _ = lock.write_all(&raw);
            let _ = lock.flush();
        }
        // Lossy: git may print paths that are not valid UTF-8.
        out.push_str(&String::from_utf8_lossy(&raw));
    }
    Ok(out)
}

#[derive(Debug)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
}
