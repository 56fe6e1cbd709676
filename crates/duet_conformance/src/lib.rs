//! Shared fixtures for duet's end-to-end tests.
//!
//! The tests under `tests/` drive real compilers and interpreters. Each one
//! asks for its toolchain through a helper such as [`cpp_compiler`] and returns
//! early when the host has none, so the suite stays green on minimal hosts.

#![warn(missing_docs)]

use std::path::{Path, PathBuf};
use std::sync::Once;

use tempfile::TempDir;

/// Reads two integers and prints their sum.
pub const APLUSB_CPP: &str = r#"#include <iostream>
int main() {
    long long a, b;
    std::cin >> a >> b;
    std::cout << a + b << std::endl;
    return 0;
}
"#;

/// Like [`APLUSB_CPP`], but wrong whenever `a == 13`.
pub const APLUSB_CPP_BUGGY: &str = r#"#include <iostream>
int main() {
    long long a, b;
    std::cin >> a >> b;
    if (a == 13) b += 1;
    std::cout << a + b << std::endl;
    return 0;
}
"#;

/// Never terminates.
pub const SPIN_CPP: &str = r#"int main() {
    volatile unsigned long long n = 0;
    for (;;) n++;
}
"#;

/// Does not compile.
pub const BROKEN_CPP: &str = "int main() { return }\n";

/// Reads two integers and prints their sum.
pub const APLUSB_PY: &str = "a, b = map(int, input().split())\nprint(a + b)\n";

/// Echoes stdin unchanged.
pub const CAT_PY: &str = "import sys\nsys.stdout.write(sys.stdin.read())\n";

/// Reads two integers and prints their sum.
pub const APLUSB_JAVA: &str = r#"import java.util.Scanner;

public class Main {
    public static void main(String[] args) {
        Scanner in = new Scanner(System.in);
        long a = in.nextLong();
        long b = in.nextLong();
        System.out.println(a + b);
    }
}
"#;

/// Reads two integers and prints their sum.
pub const APLUSB_GO: &str = r#"package main

import "fmt"

func main() {
	var a, b int64
	fmt.Scan(&a, &b)
	fmt.Println(a + b)
}
"#;

/// A scratch project directory, removed on drop.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Creates an empty project.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp project"),
        }
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `name` under the root, creating parents.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(&path, contents).expect("write project file");
        path
    }

    /// Reads `name` under the root.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.root().join(name)).expect("read project file")
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

/// The host C++ compiler, if any.
pub fn cpp_compiler() -> Option<String> {
    first_available("C++ compiler", &["g++", "clang++"])
}

/// The host Python interpreter, if any.
pub fn python() -> Option<String> {
    first_available("Python interpreter", &["python3", "python"])
}

/// The host Java compiler, if both it and the `java` launcher exist.
pub fn javac() -> Option<String> {
    let compiler = first_available("Java compiler", &["javac"])?;
    first_available("Java launcher", &["java"])?;
    Some(compiler)
}

/// The host Go toolchain, if any.
pub fn go() -> Option<String> {
    first_available("Go toolchain", &["go"])
}

fn first_available(what: &str, candidates: &[&str]) -> Option<String> {
    init_tracing();
    let found = duet_toolchain::locate(candidates);
    if found.is_none() {
        eprintln!("skipping: no {what} found (tried {})", candidates.join(", "));
    }
    found
}

/// Installs a test-writer tracing subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
