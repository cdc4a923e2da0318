use crate::{AppState, Effect, ImportStats, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScrapeRequested { platform } => {
            // Single scrape-in-flight: a request while a job is still running
            // is ignored rather than queued.
            match state.begin_job(platform) {
                Some(job_id) => vec![Effect::StartScrape { job_id, platform }],
                None => Vec::new(),
            }
        }
        Msg::CancelRequested => match state.active_job_id() {
            Some(job_id) => vec![Effect::CancelScrape { job_id }],
            None => Vec::new(),
        },
        Msg::JobProgress {
            job_id,
            percent,
            step,
        } => {
            state.apply_progress(job_id, percent, step);
            Vec::new()
        }
        Msg::JobDone { job_id, outcome } => match state.apply_done(job_id, outcome) {
            Some(review) => vec![Effect::SaveReview(review)],
            None => Vec::new(),
        },
        Msg::RestoreReview(set) => {
            state.restore_review(set);
            Vec::new()
        }
        Msg::SelectionToggled { index } => {
            if state.toggle_selection(index) {
                save_review_effects(&state)
            } else {
                Vec::new()
            }
        }
        Msg::TagAdded { index, tag } => {
            if state.add_tag(index, &tag) {
                save_review_effects(&state)
            } else {
                Vec::new()
            }
        }
        Msg::TagRemoved { index, tag } => {
            if state.remove_tag(index, &tag) {
                save_review_effects(&state)
            } else {
                Vec::new()
            }
        }
        Msg::ImportRequested => {
            let items = state.selected_items();
            if items.is_empty() {
                Vec::new()
            } else {
                state.clear_import_error();
                vec![Effect::ImportItems { items }]
            }
        }
        Msg::ImportFinished { imported, skipped } => {
            state.finish_import(ImportStats { imported, skipped });
            vec![Effect::DiscardReview]
        }
        Msg::ImportFailed { message } => {
            state.fail_import(message);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn save_review_effects(state: &AppState) -> Vec<Effect> {
    match state.review() {
        Some(set) => vec![Effect::SaveReview(set.clone())],
        None => Vec::new(),
    }
}
