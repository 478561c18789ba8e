//! Proxy exercise
//!
//! The proxy stands in for an expensive entity and only creates it the
//! first time work is requested.

use once_cell::unsync::OnceCell;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

pub trait WorkByProxy {
    fn do_work(&self, argument: &str, out: &mut Transcript) -> String;
}

pub struct RealEntity;

impl WorkByProxy for RealEntity {
    fn do_work(&self, argument: &str, _out: &mut Transcript) -> String {
        format!("Real class received '{}'", argument)
    }
}

#[derive(Default)]
pub struct ProxyEntity {
    real: OnceCell<RealEntity>,
}

impl ProxyEntity {
    pub fn new(out: &mut Transcript) -> Self {
        out.line("  --> Creating instance of proxy class...");
        Self::default()
    }

    fn real_entity(&self, out: &mut Transcript) -> &RealEntity {
        self.real.get_or_init(|| {
            out.line("  --> Creating instance of real class...");
            log::debug!("proxy created its real entity");
            RealEntity
        })
    }
}

impl WorkByProxy for ProxyEntity {
    fn do_work(&self, argument: &str, out: &mut Transcript) -> String {
        out.line("  --> proxy class DoWork() in");
        let real = self.real_entity(out);
        out.line("  --> Forwarding DoWork() call to real class...");
        real.do_work(argument, out)
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    out.line("  Getting proxy object...");
    let proxy: Box<dyn WorkByProxy> = Box::new(ProxyEntity::new(out));

    for argument in ["Initial call", "Second call", "Third call"] {
        out.line("  Calling Dowork() on proxy...");
        let output = proxy.do_work(argument, out);
        out.line(format!("  Output from proxy = \"{}\"", output));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_entity_created_on_first_call_only() {
        let mut out = Transcript::new();
        let proxy = ProxyEntity::new(&mut out);
        assert!(proxy.real.get().is_none());

        assert_eq!(proxy.do_work("a", &mut out), "Real class received 'a'");
        assert!(proxy.real.get().is_some());
        proxy.do_work("b", &mut out);

        let created = out
            .lines()
            .iter()
            .filter(|l| l.contains("Creating instance of real class"))
            .count();
        assert_eq!(created, 1);
    }

    #[test]
    fn test_run_output() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        let lines = out.into_lines();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[6], "  Output from proxy = \"Real class received 'Initial call'\"");
        assert_eq!(lines[14], "  Output from proxy = \"Real class received 'Third call'\"");
    }
}
