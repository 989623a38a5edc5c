// fopen-style mode strings

use std::fs::OpenOptions;

/// Access requested by a C `fopen` mode string.
///
/// Accepted forms: `r`, `w`, `a`, optionally followed by `+`, plus the
/// modifiers `b`, `t` (ignored) and `x` (only with `w`: fail if the file exists).
/// glibc's `e`, `m` and `c` are not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode {
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub create: bool,
    pub truncate: bool,
    pub exclusive: bool,
}

impl FileMode {
    /// Parse a mode string, returning `None` if it is not a valid `fopen` mode
    pub fn parse(mode: &str) -> Option<Self> {
        let mut chars = mode.chars();

        let primary = chars.next()?;

        let mut parsed = match primary {
            'r' => FileMode::base(true, false, false),
            'w' => FileMode {
                create: true,
                truncate: true,
                ..FileMode::base(false, true, false)
            },
            'a' => FileMode {
                create: true,
                ..FileMode::base(false, false, true)
            },
            _ => return None,
        };

        let mut seen_plus = false;
        let mut seen_binary = false;
        for c in chars {
            match c {
                '+' if !seen_plus => {
                    seen_plus = true;
                    parsed.read = true;
                    if !parsed.append {
                        parsed.write = true;
                    }
                }
                'b' | 't' if !seen_binary => seen_binary = true,
                'x' if primary == 'w' && !parsed.exclusive => parsed.exclusive = true,
                _ => return None,
            }
        }

        Some(parsed)
    }

    const fn base(read: bool, write: bool, append: bool) -> Self {
        FileMode {
            read,
            write,
            append,
            create: false,
            truncate: false,
            exclusive: false,
        }
    }

    /// Translate to `std::fs::OpenOptions`
    pub fn to_open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options
            .read(self.read)
            .write(self.write)
            .append(self.append)
            .truncate(self.truncate);

        if self.exclusive {
            options.create_new(true);
        } else {
            options.create(self.create);
        }

        options
    }
}
