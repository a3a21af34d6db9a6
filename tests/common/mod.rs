//! Common test utilities for kcm integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write a graph snapshot file, returning its path
    pub fn write_graph(&self, content: &str) -> PathBuf {
        self.write_file("graph.yaml", content);
        self.path.join("graph.yaml")
    }

    /// Create a local git repository with the given files committed
    ///
    /// Used as a source for the git hosting scheme in end-to-end tests.
    pub fn create_source_repo(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let repo_path = self.path.join("sources").join(name);
        std::fs::create_dir_all(&repo_path).expect("Failed to create repo directory");
        let repo = git2::Repository::init(&repo_path).expect("Failed to init repo");

        for (file_name, content) in files {
            let file_path = repo_path.join(file_name);
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent directory");
            }
            std::fs::write(&file_path, content).expect("Failed to write file");
        }

        let mut index = repo.index().expect("Failed to open index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");
        let sig =
            git2::Signature::now("test", "test@example.com").expect("Failed to create signature");
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .expect("Failed to commit");
        drop(tree);

        repo_path
    }
}
