// src/enrich.rs
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::{thread, time::Duration};

use crate::{
    config::options::DriverOptions,
    model::{EntityQuery, ImageRef, ResolutionResult, RunSummary},
    progress::Progress,
    resolve::Resolve,
};

/// Inter-request wait. Swappable so tests can observe pacing without sleeping.
pub trait Pause {
    fn pause(&mut self, delay: Duration);
}

/// Real wall-clock sleep.
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// Resolve every query in order, one at a time.
///
/// Exactly one result per query, same order as `queries`. A panic escaping the
/// resolver for one entity is recorded as `NotFound` and the run continues.
/// `opts.delay` is waited between consecutive searches, never before the first
/// or after the last.
pub fn enrich<R: Resolve + ?Sized>(
    resolver: &R,
    queries: &[EntityQuery],
    opts: &DriverOptions,
    pause: &mut dyn Pause,
    mut progress: Option<&mut dyn Progress>,
) -> (Vec<ResolutionResult>, RunSummary) {
    let total = queries.len();
    let delay = opts.delay();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }
    logf!("Enrich: begin entities={total} delay={delay:?}");

    let mut results: Vec<ResolutionResult> = Vec::with_capacity(total);

    for (i, query) in queries.iter().enumerate() {
        let index = i + 1;
        if let Some(p) = progress.as_deref_mut() {
            p.item_started(index, &query.name);
        }

        let image = match catch_unwind(AssertUnwindSafe(|| resolver.resolve(query))) {
            Ok(image) => image,
            Err(panic) => {
                loge!("Entity {index} ({}): resolver panicked: {}", query.name, panic_message(&*panic));
                ImageRef::NotFound
            }
        };

        let result = ResolutionResult { entity_name: query.name.clone(), image };
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(index, &result);
        }
        results.push(result);

        // Rate limiting - don't wait after the last one
        if index < total && !delay.is_zero() {
            pause.pause(delay);
        }
    }

    let summary = RunSummary::from_results(&results);
    logf!(
        "Enrich: done total={} found={} not_found={}",
        summary.total, summary.found, summary.not_found
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&summary);
    }

    (results, summary)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s!(*s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        s!("unknown panic")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Instant;

    /// Scripted resolver: entity name → outcome; "boom" panics.
    struct Scripted {
        calls: RefCell<Vec<(String, Instant)>>,
    }

    impl Scripted {
        fn new() -> Self {
            Self { calls: RefCell::new(Vec::new()) }
        }
    }

    impl Resolve for Scripted {
        fn resolve(&self, query: &EntityQuery) -> ImageRef {
            self.calls.borrow_mut().push((query.name.clone(), Instant::now()));
            match query.name.as_str() {
                "boom" => panic!("simulated resolver failure"),
                "missing" => ImageRef::NotFound,
                name => ImageRef::Found(format!("https://img.example/{name}.jpg")),
            }
        }
    }

    /// Counts pauses without sleeping.
    #[derive(Default)]
    struct CountPause {
        delays: Vec<Duration>,
    }

    impl Pause for CountPause {
        fn pause(&mut self, delay: Duration) {
            self.delays.push(delay);
        }
    }

    fn q(name: &str) -> EntityQuery {
        EntityQuery::new(name, "Ottawa", "Ontario")
    }

    fn names(results: &[ResolutionResult]) -> Vec<&str> {
        results.iter().map(|r| r.entity_name.as_str()).collect()
    }

    #[test]
    fn keeps_input_order_and_one_result_each() {
        let resolver = Scripted::new();
        let mut pause = CountPause::default();
        let (results, summary) = enrich(
            &resolver,
            &[q("a"), q("missing"), q("c")],
            &DriverOptions::default(),
            &mut pause,
            None,
        );
        assert_eq!(names(&results), vec!["a", "missing", "c"]);
        assert_eq!(results[0].image, ImageRef::Found(s!("https://img.example/a.jpg")));
        assert_eq!(results[1].image, ImageRef::NotFound);
        assert_eq!(summary, RunSummary { total: 3, found: 2, not_found: 1 });
    }

    #[test]
    fn panic_in_one_entity_does_not_stop_the_run() {
        let resolver = Scripted::new();
        let mut pause = CountPause::default();
        let (results, summary) = enrich(
            &resolver,
            &[q("a"), q("boom"), q("c")],
            &DriverOptions::default(),
            &mut pause,
            None,
        );
        assert_eq!(names(&results), vec!["a", "boom", "c"]);
        assert_eq!(results[1].image, ImageRef::NotFound);
        assert_eq!(results[2].image, ImageRef::Found(s!("https://img.example/c.jpg")));
        assert_eq!(summary.not_found, 1);
        assert_eq!(resolver.calls.borrow().len(), 3);
    }

    #[test]
    fn pauses_only_between_calls() {
        let resolver = Scripted::new();
        let mut pause = CountPause::default();
        let opts = DriverOptions { delay_ms: 1500 };
        enrich(&resolver, &[q("a"), q("b"), q("c"), q("d")], &opts, &mut pause, None);
        assert_eq!(pause.delays, vec![Duration::from_millis(1500); 3]);
    }

    #[test]
    fn single_entity_never_pauses() {
        let resolver = Scripted::new();
        let mut pause = CountPause::default();
        enrich(&resolver, &[q("a")], &DriverOptions::default(), &mut pause, None);
        assert!(pause.delays.is_empty());
    }

    #[test]
    fn empty_input_is_empty_summary() {
        let resolver = Scripted::new();
        let mut pause = CountPause::default();
        let (results, summary) = enrich(&resolver, &[], &DriverOptions::default(), &mut pause, None);
        assert!(results.is_empty());
        assert_eq!(summary, RunSummary::default());
        assert!(resolver.calls.borrow().is_empty());
    }

    #[test]
    fn call_starts_are_spaced_by_delay() {
        let resolver = Scripted::new();
        let opts = DriverOptions { delay_ms: 30 };
        enrich(&resolver, &[q("a"), q("b"), q("c")], &opts, &mut ThreadPause, None);

        let calls = resolver.calls.borrow();
        assert_eq!(calls.len(), 3);
        for pair in calls.windows(2) {
            assert!(pair[1].1.duration_since(pair[0].1) >= Duration::from_millis(30));
        }
    }
}
