//! Standard-library module names.

use std::collections::HashSet;

/// Top-level modules shipped with CPython 3, including ones removed in
/// recent releases that older projects still import.
const PYTHON3_STDLIB: &[&str] = &[
    "__future__", "_abc", "_ast", "_asyncio", "_bisect", "_blake2", "_bz2", "_codecs",
    "_collections", "_collections_abc", "_compat_pickle", "_compression", "_contextvars",
    "_csv", "_ctypes", "_datetime", "_decimal", "_functools", "_hashlib", "_heapq", "_imp",
    "_io", "_json", "_locale", "_lsprof", "_lzma", "_markupbase", "_md5", "_multiprocessing",
    "_opcode", "_operator", "_pickle", "_posixsubprocess", "_py_abc", "_pydecimal", "_pyio",
    "_queue", "_random", "_sha1", "_sha2", "_sha256", "_sha3", "_sha512", "_signal",
    "_socket", "_sqlite3", "_sre", "_ssl", "_stat", "_string", "_strptime", "_struct",
    "_symtable", "_thread", "_threading_local", "_tracemalloc", "_typing", "_uuid",
    "_warnings", "_weakref", "_weakrefset", "_winapi", "_zoneinfo", "abc", "aifc", "antigravity",
    "argparse", "array", "ast", "asynchat", "asyncio", "asyncore", "atexit", "audioop",
    "base64", "bdb", "binascii", "bisect", "builtins", "bz2", "cProfile", "calendar", "cgi",
    "cgitb", "chunk", "cmath", "cmd", "code", "codecs", "codeop", "collections", "colorsys",
    "compileall", "concurrent", "configparser", "contextlib", "contextvars", "copy",
    "copyreg", "crypt", "csv", "ctypes", "curses", "dataclasses", "datetime", "dbm",
    "decimal", "difflib", "dis", "distutils", "doctest", "email", "encodings", "ensurepip",
    "enum", "errno", "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch", "fractions",
    "ftplib", "functools", "gc", "genericpath", "getopt", "getpass", "gettext", "glob",
    "graphlib", "grp", "gzip", "hashlib", "heapq", "hmac", "html", "http", "idlelib",
    "imaplib", "imghdr", "imp", "importlib", "inspect", "io", "ipaddress", "itertools",
    "json", "keyword", "lib2to3", "linecache", "locale", "logging", "lzma", "mailbox",
    "mailcap", "marshal", "math", "mimetypes", "mmap", "modulefinder", "msilib", "msvcrt",
    "multiprocessing", "netrc", "nis", "nntplib", "nt", "ntpath", "nturl2path", "numbers",
    "opcode", "operator", "optparse", "os", "ossaudiodev", "pathlib", "pdb", "pickle",
    "pickletools", "pipes", "pkgutil", "platform", "plistlib", "poplib", "posix",
    "posixpath", "pprint", "profile", "pstats", "pty", "pwd", "py_compile", "pyclbr",
    "pydoc", "pydoc_data", "pyexpat", "queue", "quopri", "random", "re", "readline",
    "reprlib", "resource", "rlcompleter", "runpy", "sched", "secrets", "select",
    "selectors", "shelve", "shlex", "shutil", "signal", "site", "smtpd", "smtplib", "sndhdr",
    "socket", "socketserver", "spwd", "sqlite3", "sre_compile", "sre_constants",
    "sre_parse", "ssl", "stat", "statistics", "string", "stringprep", "struct",
    "subprocess", "sunau", "symtable", "sys", "sysconfig", "syslog", "tabnanny", "tarfile",
    "telnetlib", "tempfile", "termios", "textwrap", "this", "threading", "time", "timeit",
    "tkinter", "token", "tokenize", "tomllib", "trace", "traceback", "tracemalloc", "tty",
    "turtle", "turtledemo", "types", "typing", "unicodedata", "unittest", "urllib", "uu",
    "uuid", "venv", "warnings", "wave", "weakref", "webbrowser", "winreg", "winsound",
    "wsgiref", "xdrlib", "xml", "xmlrpc", "zipapp", "zipfile", "zipimport", "zlib",
    "zoneinfo",
];

/// Set of top-level standard-library module names.
#[derive(Debug, Clone)]
pub struct StdlibNames {
    names: HashSet<String>,
}

impl StdlibNames {
    /// The CPython 3 standard library.
    pub fn python3() -> Self {
        Self::from_names(PYTHON3_STDLIB.iter().copied())
    }

    /// Build from an arbitrary set of names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Add names, e.g. from configuration.
    pub fn with_extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether `name` is a standard-library top-level module.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for StdlibNames {
    fn default() -> Self {
        Self::python3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python3_contains_common_modules() {
        let stdlib = StdlibNames::python3();
        for name in ["os", "sys", "json", "asyncio", "__future__", "typing", "tomllib"] {
            assert!(stdlib.contains(name), "{} should be stdlib", name);
        }
    }

    #[test]
    fn python3_excludes_third_party() {
        let stdlib = StdlibNames::python3();
        assert!(!stdlib.contains("requests"));
        assert!(!stdlib.contains("numpy"));
        assert!(!stdlib.contains("yaml"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let stdlib = StdlibNames::python3();
        assert!(stdlib.contains("cProfile"));
        assert!(!stdlib.contains("OS"));
    }

    #[test]
    fn extra_names_are_added() {
        let stdlib = StdlibNames::from_names(["os"]).with_extra(["_vendor_shim"]);
        assert!(stdlib.contains("_vendor_shim"));
        assert_eq!(stdlib.len(), 2);
    }
}
