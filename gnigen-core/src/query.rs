use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

/// Source of a serialized build-graph query result.
pub trait QueryCommand {
    /// Run the query and return its raw output.
    fn read(&self) -> io::Result<Vec<u8>>;
}

impl<T: QueryCommand + ?Sized> QueryCommand for &T {
    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }
}

/// Runs `bazel query ... --output=jsonproto` inside a workspace.
#[derive(Debug, Clone)]
pub struct BazelQuery {
    program: String,
    expression: String,
    workspace_dir: PathBuf,
}

impl BazelQuery {
    pub fn new(
        program: impl Into<String>,
        expression: impl Into<String>,
        workspace_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            expression: expression.into(),
            workspace_dir: workspace_dir.into(),
        }
    }

    /// Query expression passed to bazel.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    fn args(&self) -> [&str; 4] {
        [
            "query",
            "--noimplicit_deps",
            &self.expression,
            "--output=jsonproto",
        ]
    }
}

impl QueryCommand for BazelQuery {
    fn read(&self) -> io::Result<Vec<u8>> {
        tracing::debug!(
            program = %self.program,
            expression = %self.expression,
            dir = %self.workspace_dir.display(),
            "running build-graph query"
        );

        let output = Command::new(&self.program)
            .args(self.args())
            .current_dir(&self.workspace_dir)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::other(format!(
                "`{} query` exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

/// Serves a query result previously saved to disk.
#[derive(Debug, Clone)]
pub struct FileQuery {
    path: PathBuf,
}

impl FileQuery {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QueryCommand for FileQuery {
    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}
