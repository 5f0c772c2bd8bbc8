//! Shared fixture for integration tests.
//!
//! Builds real repositories with the `git` CLI inside a temp dir so the
//! git2-backed graph is exercised against what git itself writes.

#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use versionstamp::core::types::Oid;
use versionstamp::git::Git;

/// Test fixture that creates a real git repository.
pub struct TestRepo {
    dir: TempDir,
    files: Cell<usize>,
}

impl TestRepo {
    /// Create a new test repository on `main` with an initial commit.
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.commit("Initial commit");
        repo
    }

    /// Create a repository with no commits (unborn HEAD).
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "-q"]);
        run_git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);
        run_git(dir.path(), &["config", "tag.gpgsign", "false"]);

        Self {
            dir,
            files: Cell::new(0),
        }
    }

    /// Get the path to the repository.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open a Git interface to this repository.
    pub fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Commit a fresh file, returning the new HEAD.
    pub fn commit(&self, message: &str) -> Oid {
        let file = format!("file-{}.txt", self.next_file());
        std::fs::write(self.path().join(&file), message).unwrap();
        run_git(self.path(), &["add", &file]);
        run_git(self.path(), &["commit", "-q", "-m", message]);
        self.head()
    }

    /// Commit `count` times, returning the final HEAD.
    pub fn commits(&self, count: usize) -> Oid {
        let mut head = self.head();
        for i in 0..count {
            head = self.commit(&format!("commit {}", i));
        }
        head
    }

    /// Create a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) {
        run_git(self.path(), &["tag", name]);
    }

    /// Create a lightweight tag at `rev`.
    pub fn tag_at(&self, name: &str, rev: &str) {
        run_git(self.path(), &["tag", name, rev]);
    }

    /// Create an annotated tag at HEAD.
    pub fn annotated_tag(&self, name: &str) {
        run_git(self.path(), &["tag", "-a", name, "-m", name]);
    }

    /// Create an annotated tag at HEAD with a fixed tagger date.
    pub fn annotated_tag_dated(&self, name: &str, date: &str) {
        run_git_env(
            self.path(),
            &["tag", "-a", name, "-m", name],
            &[("GIT_COMMITTER_DATE", date)],
        );
    }

    /// Create a branch at HEAD.
    pub fn branch(&self, name: &str) {
        run_git(self.path(), &["branch", name]);
    }

    /// Check out a branch.
    pub fn checkout(&self, name: &str) {
        run_git(self.path(), &["checkout", "-q", name]);
    }

    /// Merge `branch` into HEAD with a merge commit.
    pub fn merge_no_ff(&self, branch: &str) -> Oid {
        run_git(
            self.path(),
            &["merge", "-q", "--no-ff", "-m", &format!("Merge {}", branch), branch],
        );
        self.head()
    }

    /// HEAD as git itself resolves it.
    pub fn head(&self) -> Oid {
        Oid::new(self.rev_parse(&["HEAD"])).unwrap()
    }

    /// Abbreviated id as git itself prints it.
    pub fn short(&self, rev: &str) -> String {
        self.rev_parse(&["--short", rev])
    }

    /// Run `git rev-parse` and return trimmed stdout.
    pub fn rev_parse(&self, args: &[&str]) -> String {
        let mut full = vec!["rev-parse"];
        full.extend_from_slice(args);
        git_stdout(self.path(), &full)
    }

    /// Write a file into the work tree without committing it.
    pub fn write(&self, path: &str, contents: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, contents).unwrap();
    }

    fn next_file(&self) -> usize {
        let n = self.files.get();
        self.files.set(n + 1);
        n
    }
}

/// Run a git command in the given directory.
pub fn run_git(dir: &Path, args: &[&str]) {
    run_git_env(dir, args, &[]);
}

/// Run a git command with extra environment variables.
pub fn run_git_env(dir: &Path, args: &[&str], env: &[(&str, &str)]) {
    let output = Command::new("git")
        .args(args)
        .envs(env.iter().copied())
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Run a git command and return trimmed stdout.
pub fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    String::from_utf8(output.stdout).unwrap().trim().to_string()
}
