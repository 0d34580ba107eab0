use std::fmt;
use std::io::Write;

/// Append-only audit trail of everything an import did, or would have done.
///
/// Passed by `&mut` into every step instead of living in a global. Entries
/// are also emitted as `debug` events and, when an echo writer is set,
/// written out immediately so the operator sees them before being prompted.
#[derive(Default)]
pub struct Journal {
    entries: Vec<String>,
    echo: Option<Box<dyn Write>>,
}
impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A journal that also writes every entry (one per line) to `writer`.
    pub fn echo_to(writer: impl Write + 'static) -> Self {
        Self {
            entries: Vec::new(),
            echo: Some(Box::new(writer)),
        }
    }

    pub fn record(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        tracing::debug!(entry = %entry, "Journal");
        if let Some(echo) = self.echo.as_mut()
            && let Err(e) = writeln!(echo, "{entry}").and_then(|()| echo.flush())
        {
            tracing::warn!(error = %e, "Could not echo journal entry");
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("entries", &self.entries)
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);
    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_records_in_order() {
        let mut journal = Journal::new();
        journal.record("first");
        journal.record(String::from("second"));
        assert_eq!(journal.entries(), ["first", "second"]);
    }

    #[test]
    fn test_echoes_each_entry() {
        let output = Shared::default();
        let mut journal = Journal::echo_to(output.clone());
        journal.record("Copy DSC_0001.JPG to z3d00001.jpg");
        journal.record("Copy DSC_0002.NEF to z3d00002.nef");
        assert_eq!(
            String::from_utf8(output.0.borrow().clone()).unwrap(),
            "Copy DSC_0001.JPG to z3d00001.jpg\nCopy DSC_0002.NEF to z3d00002.nef\n"
        );
        assert_eq!(journal.entries().len(), 2);
    }
}
