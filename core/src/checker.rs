//! Change polling and spell-check orchestration.
//!
//! One worker thread owns the text surface and drains a FIFO job queue;
//! every cursor access and every session-state write happens there, so a
//! poll cycle can never interleave with a full-document cursor walk or with
//! a replacement edit. A timer thread enqueues ticks at a fixed interval,
//! coalesced through an atomic flag so ticks that arrive while the worker is
//! mid-walk collapse into one. Network fetches and ignore-rule persistence
//! run on short-lived threads and report back through the same queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::{CorrectionProvider, SpellCheckError};
use crate::correction::Match;
use crate::filter::filter_matches;
use crate::ignore::{IgnoreRule, IgnoreRuleStore, IgnoreRuleType};
use crate::sampler::DocumentSampler;
use crate::session::{SampleOutcome, SessionState};
use crate::surface::TextSurface;
use crate::SpellConfig;

enum Job {
    Tick,
    FetchDone {
        sentence: String,
        result: Result<Vec<Match>, SpellCheckError>,
    },
    Replace(Match),
    IgnoreRule(Match),
    IgnoreCategory(Match),
    InsertText(String),
    DeleteBackward,
    SetFullDocumentMode(bool),
    SetConnectivity(bool),
    Shutdown,
}

/// A running spell-check session.
///
/// Spawned when the keyboard attaches to a text field and dropped when it
/// detaches. All methods are cheap enqueues; the work happens on the
/// session's worker thread.
pub struct SpellChecker {
    tx: Sender<Job>,
    state: Arc<Mutex<SessionState>>,
    watchers: Arc<Mutex<Vec<Sender<SessionState>>>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    timer: Option<JoinHandle<()>>,
}

impl SpellChecker {
    /// Start the poll loop over `surface`, checking through `provider` and
    /// filtering through `store`.
    pub fn spawn(
        surface: Box<dyn TextSurface + Send>,
        provider: Arc<dyn CorrectionProvider>,
        store: Arc<dyn IgnoreRuleStore>,
        config: SpellConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let state = Arc::new(Mutex::new(SessionState::new()));
        let watchers: Arc<Mutex<Vec<Sender<SessionState>>>> = Arc::new(Mutex::new(Vec::new()));
        let running = Arc::new(AtomicBool::new(true));
        let tick_pending = Arc::new(AtomicBool::new(false));

        let worker = {
            let ctx = WorkerContext {
                rx,
                surface,
                sampler: DocumentSampler::new(Duration::from_millis(config.settle_delay_ms)),
                provider,
                store,
                state: Arc::clone(&state),
                watchers: Arc::clone(&watchers),
                tx: tx.clone(),
                tick_pending: Arc::clone(&tick_pending),
            };
            thread::spawn(move || ctx.run())
        };

        let timer = {
            let running = Arc::clone(&running);
            let tx = tx.clone();
            let interval = Duration::from_millis(config.poll_interval_ms.max(1));
            thread::spawn(move || {
                while running.load(Ordering::Acquire) {
                    thread::park_timeout(interval);
                    if !running.load(Ordering::Acquire) {
                        break;
                    }
                    // Coalesce: skip the tick if the previous one has not
                    // been consumed yet (e.g. a full-document walk is
                    // underway).
                    if tick_pending.swap(true, Ordering::AcqRel) {
                        continue;
                    }
                    if tx.send(Job::Tick).is_err() {
                        break;
                    }
                }
            })
        };

        debug!("spell-check session started");
        Self {
            tx,
            state,
            watchers,
            running,
            worker: Some(worker),
            timer: Some(timer),
        }
    }

    /// Run a sample-and-check cycle now instead of waiting for the next tick.
    pub fn check_now(&self) {
        let _ = self.tx.send(Job::Tick);
    }

    /// Apply a match's preferred replacement to the live text and drop the
    /// match from the session. No-op when the match carries no replacements.
    pub fn replace_with_match(&self, m: Match) {
        let _ = self.tx.send(Job::Replace(m));
    }

    /// Persist an ignore entry for the match's rule id and drop the match.
    pub fn ignore_rule(&self, m: Match) {
        let _ = self.tx.send(Job::IgnoreRule(m));
    }

    /// Persist an ignore entry for the match's category id and drop the match.
    pub fn ignore_category(&self, m: Match) {
        let _ = self.tx.send(Job::IgnoreCategory(m));
    }

    /// Key passthrough: type `text` at the cursor.
    pub fn insert_text(&self, text: impl Into<String>) {
        let _ = self.tx.send(Job::InsertText(text.into()));
    }

    /// Key passthrough: delete one character before the cursor.
    pub fn delete_backward(&self) {
        let _ = self.tx.send(Job::DeleteBackward);
    }

    /// Switch between full-document and current-sentence sampling.
    pub fn set_full_document_mode(&self, enabled: bool) {
        let _ = self.tx.send(Job::SetFullDocumentMode(enabled));
    }

    /// Push the host's reachability signal into the session.
    pub fn set_connectivity(&self, online: bool) {
        let _ = self.tx.send(Job::SetConnectivity(online));
    }

    /// Cloned snapshot of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.state
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Receive a snapshot after every state mutation. Dropped receivers are
    /// pruned on the next notification.
    pub fn subscribe(&self) -> Receiver<SessionState> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut ws) = self.watchers.lock() {
            ws.push(tx);
        }
        rx
    }
}

impl Drop for SpellChecker {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        let _ = self.tx.send(Job::Shutdown);
        if let Some(timer) = self.timer.take() {
            timer.thread().unpark();
            let _ = timer.join();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        debug!("spell-check session ended");
    }
}

struct WorkerContext {
    rx: Receiver<Job>,
    surface: Box<dyn TextSurface + Send>,
    sampler: DocumentSampler,
    provider: Arc<dyn CorrectionProvider>,
    store: Arc<dyn IgnoreRuleStore>,
    state: Arc<Mutex<SessionState>>,
    watchers: Arc<Mutex<Vec<Sender<SessionState>>>>,
    tx: Sender<Job>,
    tick_pending: Arc<AtomicBool>,
}

impl WorkerContext {
    fn run(mut self) {
        while let Ok(job) = self.rx.recv() {
            match job {
                Job::Shutdown => break,
                Job::Tick => {
                    self.tick_pending.store(false, Ordering::Release);
                    self.poll_cycle();
                }
                Job::FetchDone { sentence, result } => self.finish_fetch(sentence, result),
                Job::Replace(m) => self.replace(m),
                Job::IgnoreRule(m) => self.ignore(
                    m.rule.id.clone(),
                    IgnoreRuleType::Rule,
                    m.rule.description.clone(),
                    m,
                ),
                Job::IgnoreCategory(m) => self.ignore(
                    m.rule.category.id.clone(),
                    IgnoreRuleType::Category,
                    m.rule.category.name.clone(),
                    m,
                ),
                Job::InsertText(text) => self.surface.insert_text(&text),
                Job::DeleteBackward => self.surface.delete_backward(),
                Job::SetFullDocumentMode(enabled) => {
                    self.mutate(|st| st.full_document_mode = enabled)
                }
                Job::SetConnectivity(online) => self.mutate(|st| st.has_internet = online),
            }
        }
    }

    /// Sample the surface, fold the text into the state, and dispatch a
    /// fetch when the text is new.
    fn poll_cycle(&mut self) {
        let full_mode = self
            .state
            .lock()
            .map(|st| st.full_document_mode)
            .unwrap_or(false);

        let text = if full_mode {
            self.sampler.full_document_context(self.surface.as_mut())
        } else {
            self.sampler.current_sentence(self.surface.as_ref())
        };

        let outcome = match self.state.lock() {
            Ok(mut st) => {
                let outcome = st.apply_sample(&text);
                if outcome == SampleOutcome::NeedsCheck {
                    st.is_loading = true;
                }
                outcome
            }
            Err(_) => return,
        };
        self.notify();

        if outcome == SampleOutcome::NeedsCheck {
            debug!(len = text.chars().count(), "dispatching spell check");
            let provider = Arc::clone(&self.provider);
            let tx = self.tx.clone();
            thread::spawn(move || {
                let result = provider.spell_check(&text);
                let _ = tx.send(Job::FetchDone {
                    sentence: text,
                    result,
                });
            });
        }
    }

    fn finish_fetch(&mut self, sentence: String, result: Result<Vec<Match>, SpellCheckError>) {
        let matches = match result {
            Ok(matches) => matches,
            Err(err) => {
                // Silent degrade: the user just stops getting fresh
                // suggestions until the next successful cycle.
                warn!("spell check failed: {err}");
                return;
            }
        };

        let ignore_rules = match self.store.get_all() {
            Ok(rules) => rules,
            Err(err) => {
                warn!("ignore rule lookup failed, committing unfiltered: {err}");
                Vec::new()
            }
        };
        let filtered = filter_matches(&matches, &ignore_rules);

        let committed = self
            .state
            .lock()
            .map(|mut st| st.commit_result(&sentence, filtered))
            .unwrap_or(false);
        if committed {
            self.notify();
        } else {
            debug!("dropping stale spell check completion");
        }
    }

    /// Apply `m`'s preferred replacement to the live document.
    ///
    /// The cursor is first pushed to the end of the sampled context so the
    /// whole of `text_input` sits behind it; the input is then deleted
    /// character by character and re-inserted with the match's range
    /// replaced.
    fn replace(&mut self, m: Match) {
        let Some(replacement) = m.preferred_replacement().map(str::to_string) else {
            return;
        };

        let (text_input, full_mode) = match self.state.lock() {
            Ok(st) => (st.text_input.clone(), st.full_document_mode),
            Err(_) => return,
        };

        if full_mode {
            self.sampler.move_to_end_of_document(self.surface.as_mut());
        } else {
            self.sampler.move_to_end_of_sentence(self.surface.as_mut());
        }

        let char_len = text_input.chars().count() as i64;
        // checked_add: a huge wire offset must land in the invalid-range
        // path, not overflow.
        let end_in_range = m
            .offset
            .checked_add(m.length)
            .is_some_and(|end| end <= char_len);
        if m.offset < 0 || m.length <= 0 || !end_in_range {
            warn!(offset = m.offset, length = m.length, "invalid range");
            return;
        }

        let corrected = splice_chars(
            &text_input,
            m.offset as usize,
            m.length as usize,
            &replacement,
        );
        for _ in 0..char_len {
            self.surface.delete_backward();
        }
        self.surface.insert_text(&corrected);

        self.mutate(|st| st.remove_match(&m));
    }

    /// Persist an ignore entry (fire-and-forget) and optimistically remove
    /// the match. A store failure is logged and never resurrects the match.
    fn ignore(&mut self, id: String, rule_type: IgnoreRuleType, title: String, m: Match) {
        let rule = IgnoreRule::new(id, rule_type, title);
        let store = Arc::clone(&self.store);
        thread::spawn(move || match store.add(rule) {
            Ok(added) => debug!(added, "ignore rule persisted"),
            Err(err) => warn!("ignore rule persistence failed: {err}"),
        });

        self.mutate(|st| st.remove_match(&m));
    }

    fn mutate(&mut self, f: impl FnOnce(&mut SessionState)) {
        if let Ok(mut st) = self.state.lock() {
            f(&mut st);
        }
        self.notify();
    }

    fn notify(&self) {
        let snapshot = match self.state.lock() {
            Ok(st) => st.clone(),
            Err(_) => return,
        };
        if let Ok(mut ws) = self.watchers.lock() {
            ws.retain(|w| w.send(snapshot.clone()).is_ok());
        }
    }
}

/// Replace `length` characters starting at character `offset` in `text`.
fn splice_chars(text: &str, offset: usize, length: usize, replacement: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.extend(&chars[..offset]);
    out.push_str(replacement);
    out.extend(&chars[offset + length..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::{Category, Replacement, Rule};
    use crate::ignore::InMemoryIgnoreStore;
    use crate::surface::BufferSurface;
    use std::collections::HashMap;
    use std::time::Instant;

    fn make_match(rule_id: &str, offset: i64, length: i64, replacement: &str) -> Match {
        Match {
            offset,
            length,
            message: "possible mistake".to_string(),
            replacements: vec![Replacement {
                value: replacement.to_string(),
            }],
            rule: Rule {
                id: rule_id.to_string(),
                description: format!("rule {rule_id}"),
                category: Category {
                    id: "c1".to_string(),
                    name: "Grammar".to_string(),
                },
            },
        }
    }

    /// Provider answering from a scripted sentence -> matches table, with an
    /// optional per-sentence latency.
    struct ScriptedProvider {
        responses: Mutex<HashMap<String, Vec<Match>>>,
        delays: Mutex<HashMap<String, Duration>>,
    }

    impl ScriptedProvider {
        fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
                delays: Mutex::new(HashMap::new()),
            }
        }

        fn respond(&self, sentence: &str, matches: Vec<Match>) {
            self.responses
                .lock()
                .unwrap()
                .insert(sentence.to_string(), matches);
        }

        fn delay(&self, sentence: &str, delay: Duration) {
            self.delays
                .lock()
                .unwrap()
                .insert(sentence.to_string(), delay);
        }
    }

    impl CorrectionProvider for ScriptedProvider {
        fn spell_check(&self, text: &str) -> Result<Vec<Match>, SpellCheckError> {
            let delay = self.delays.lock().unwrap().get(text).copied();
            if let Some(delay) = delay {
                thread::sleep(delay);
            }
            Ok(self
                .responses
                .lock()
                .unwrap()
                .get(text)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn test_config() -> SpellConfig {
        SpellConfig {
            // Ticks are driven manually via check_now in tests.
            poll_interval_ms: 3_600_000,
            settle_delay_ms: 0,
            ..SpellConfig::default()
        }
    }

    fn wait_until(
        checker: &SpellChecker,
        predicate: impl Fn(&SessionState) -> bool,
    ) -> SessionState {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let snapshot = checker.snapshot();
            if predicate(&snapshot) {
                return snapshot;
            }
            assert!(Instant::now() < deadline, "timed out waiting for state");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn spawn_checker(
        text: &str,
        provider: Arc<ScriptedProvider>,
        store: Arc<dyn IgnoreRuleStore>,
    ) -> (SpellChecker, Arc<Mutex<BufferSurface>>) {
        let surface = Arc::new(Mutex::new(BufferSurface::with_text(text, 128)));
        let checker = SpellChecker::spawn(
            Box::new(Arc::clone(&surface)),
            provider,
            store,
            test_config(),
        );
        (checker, surface)
    }

    #[test]
    fn tick_fetches_and_publishes_matches() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.respond("how far", vec![make_match("r1", 0, 3, "How")]);
        let (checker, _surface) = spawn_checker(
            "how far",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        checker.check_now();
        let state = wait_until(&checker, |st| !st.correction_matches.is_empty());
        assert_eq!(state.text_input, "how far");
        assert_eq!(state.last_spell_checked, "how far");
        assert!(!state.is_loading);
    }

    #[test]
    fn unchanged_text_does_not_refetch() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.respond("same text", vec![make_match("r1", 0, 4, "Same")]);
        let (checker, _surface) = spawn_checker(
            "same text",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        checker.check_now();
        let first = wait_until(&checker, |st| st.last_spell_checked == "same text");

        // Remove the provider response; a refetch would now clear matches.
        provider.respond("same text", vec![]);
        checker.check_now();
        checker.check_now();
        thread::sleep(Duration::from_millis(50));

        let after = checker.snapshot();
        assert_eq!(after.correction_matches, first.correction_matches);
        assert_eq!(after.last_spell_checked, "same text");
    }

    #[test]
    fn empty_field_resets_session() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.respond("oya now", vec![make_match("r1", 0, 3, "Oya")]);
        let (checker, surface) = spawn_checker(
            "oya now",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        checker.check_now();
        wait_until(&checker, |st| !st.correction_matches.is_empty());

        surface.lock().unwrap().set_text("");
        checker.check_now();
        let state = wait_until(&checker, |st| st.text_input.is_empty());
        assert!(state.correction_matches.is_empty());
        assert!(state.last_spell_checked.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn stale_completion_never_overwrites_newer_result() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.respond("text a", vec![make_match("ra", 0, 4, "Aa")]);
        provider.delay("text a", Duration::from_millis(200));
        provider.respond("text b", vec![make_match("rb", 0, 4, "Bb")]);
        let (checker, surface) = spawn_checker(
            "text a",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        // Dispatch the slow check for "text a", then move the document on
        // and dispatch the fast check for "text b".
        checker.check_now();
        wait_until(&checker, |st| st.is_loading);
        surface.lock().unwrap().set_text("text b");
        checker.check_now();

        let state = wait_until(&checker, |st| st.last_spell_checked == "text b");
        assert_eq!(state.correction_matches, vec![make_match("rb", 0, 4, "Bb")]);

        // Let the "text a" completion arrive; it must be discarded.
        thread::sleep(Duration::from_millis(300));
        let after = checker.snapshot();
        assert_eq!(after.last_spell_checked, "text b");
        assert_eq!(after.correction_matches, vec![make_match("rb", 0, 4, "Bb")]);
    }

    #[test]
    fn replace_edits_live_text_and_drops_match() {
        let provider = Arc::new(ScriptedProvider::new());
        let m = make_match("r1", 0, 3, "This");
        provider.respond("Dis tin dey sweet", vec![m.clone()]);
        let (checker, surface) = spawn_checker(
            "Dis tin dey sweet",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        checker.check_now();
        wait_until(&checker, |st| !st.correction_matches.is_empty());

        checker.replace_with_match(m);
        let state = wait_until(&checker, |st| st.correction_matches.is_empty());
        assert_eq!(surface.lock().unwrap().text(), "This tin dey sweet");
        // The corrected text is picked up by the next poll cycle.
        assert_eq!(state.text_input, "Dis tin dey sweet");
    }

    #[test]
    fn replace_with_invalid_range_mutates_nothing() {
        let provider = Arc::new(ScriptedProvider::new());
        let negative = make_match("r1", -1, 3, "x");
        let overlong = make_match("r2", 3, 100, "y");
        provider.respond("short text", vec![negative.clone(), overlong.clone()]);
        let (checker, surface) = spawn_checker(
            "short text",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        checker.check_now();
        wait_until(&checker, |st| st.correction_matches.len() == 2);

        checker.replace_with_match(negative);
        checker.replace_with_match(overlong);
        // Give the worker time to drain both jobs.
        thread::sleep(Duration::from_millis(100));

        let state = checker.snapshot();
        assert_eq!(surface.lock().unwrap().text(), "short text");
        assert_eq!(state.correction_matches.len(), 2);
    }

    #[test]
    fn replace_with_huge_offset_is_invalid_and_worker_survives() {
        let provider = Arc::new(ScriptedProvider::new());
        let huge = make_match("r1", i64::MAX, 1, "x");
        provider.respond("short text", vec![huge.clone()]);
        let (checker, surface) = spawn_checker(
            "short text",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        checker.check_now();
        wait_until(&checker, |st| !st.correction_matches.is_empty());

        checker.replace_with_match(huge);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(surface.lock().unwrap().text(), "short text");
        assert_eq!(checker.snapshot().correction_matches.len(), 1);

        // The worker is still draining jobs after the rejected range.
        checker.insert_text("!");
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if surface.lock().unwrap().text() == "short text!" {
                break;
            }
            assert!(Instant::now() < deadline, "worker stopped processing jobs");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn replace_without_replacements_is_noop() {
        let provider = Arc::new(ScriptedProvider::new());
        let mut m = make_match("r1", 0, 5, "x");
        m.replacements.clear();
        provider.respond("short text", vec![m.clone()]);
        let (checker, surface) = spawn_checker(
            "short text",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        checker.check_now();
        wait_until(&checker, |st| !st.correction_matches.is_empty());

        checker.replace_with_match(m);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(surface.lock().unwrap().text(), "short text");
        assert_eq!(checker.snapshot().correction_matches.len(), 1);
    }

    #[test]
    fn ignore_rule_removes_match_and_persists() {
        let provider = Arc::new(ScriptedProvider::new());
        let store = Arc::new(InMemoryIgnoreStore::new());
        let m = make_match("r1", 0, 3, "This");
        provider.respond("Dis fine day", vec![m.clone()]);
        let (checker, _surface) = spawn_checker(
            "Dis fine day",
            Arc::clone(&provider),
            Arc::clone(&store) as Arc<dyn IgnoreRuleStore>,
        );

        checker.check_now();
        wait_until(&checker, |st| !st.correction_matches.is_empty());

        checker.ignore_rule(m);
        wait_until(&checker, |st| st.correction_matches.is_empty());

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let all = store.get_all().unwrap();
            if !all.is_empty() {
                assert_eq!(all[0].id, "r1");
                assert_eq!(all[0].rule_type, IgnoreRuleType::Rule);
                break;
            }
            assert!(Instant::now() < deadline, "ignore rule never persisted");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn connectivity_and_mode_flags_are_published() {
        let provider = Arc::new(ScriptedProvider::new());
        let (checker, _surface) = spawn_checker(
            "",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        assert!(checker.snapshot().has_internet);
        checker.set_connectivity(false);
        wait_until(&checker, |st| !st.has_internet);

        checker.set_full_document_mode(true);
        wait_until(&checker, |st| st.full_document_mode);
    }

    #[test]
    fn key_passthroughs_edit_the_surface() {
        let provider = Arc::new(ScriptedProvider::new());
        let (checker, surface) = spawn_checker(
            "abeg",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        checker.insert_text(" o");
        checker.delete_backward();
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if surface.lock().unwrap().text() == "abeg " {
                break;
            }
            assert!(Instant::now() < deadline, "passthroughs never applied");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn subscriber_sees_committed_state() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.respond("na so", vec![make_match("r1", 0, 2, "Na")]);
        let (checker, _surface) = spawn_checker(
            "na so",
            Arc::clone(&provider),
            Arc::new(InMemoryIgnoreStore::new()),
        );

        let rx = checker.subscribe();
        checker.check_now();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let snapshot = rx
                .recv_timeout(deadline - Instant::now())
                .expect("no notification before timeout");
            if !snapshot.correction_matches.is_empty() {
                assert_eq!(snapshot.last_spell_checked, "na so");
                break;
            }
        }
    }

    #[test]
    fn splice_chars_replaces_character_range() {
        assert_eq!(splice_chars("Dis tin", 0, 3, "This"), "This tin");
        assert_eq!(splice_chars("héllo wörld", 6, 5, "word"), "héllo word");
    }
}
