//! Exercised flows keep the list, form, and delete-confirmation behaviour reliable.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;
use crate::model::NewTask;
use crate::persistence::{MemoryStore, FILTER_KEY};

fn controller() -> Controller<MemoryStore> {
    Controller::new(Persistence::new(MemoryStore::new()))
}

fn add(controller: &mut Controller<MemoryStore>, title: &str, description: &str) -> String {
    assert!(controller.start_add());
    assert!(controller.save_form(TaskFields::new(title, description)));
    controller.tasks()[0].id.clone()
}

fn count(controller: &Controller<MemoryStore>, status: TaskStatus) -> usize {
    controller
        .projection()
        .bucket(status)
        .map(|bucket| bucket.count())
        .unwrap_or_default()
}

#[test]
fn add_toggle_delete_round_trip() {
    let mut controller = controller();

    let id = add(&mut controller, "Buy milk", "");
    assert_eq!(controller.tasks().len(), 1);
    assert_eq!(controller.tasks()[0].status, TaskStatus::Pending);
    assert_eq!(count(&controller, TaskStatus::Pending), 1);

    let toggled = controller.toggle_complete(&id).unwrap();
    assert_eq!(toggled.status, TaskStatus::Completed);
    assert_eq!(count(&controller, TaskStatus::Completed), 1);
    assert_eq!(count(&controller, TaskStatus::Pending), 0);

    controller.request_delete(&id);
    assert!(controller.read_model().delete_pending);
    assert!(controller.confirm_delete());
    assert!(controller.tasks().is_empty());
    assert_eq!(count(&controller, TaskStatus::Pending), 0);
    assert_eq!(count(&controller, TaskStatus::Completed), 0);
    assert!(!controller.is_delete_pending());
}

#[test]
fn blank_title_keeps_form_open() {
    let mut controller = controller();
    assert!(controller.start_add());
    assert!(!controller.save_form(TaskFields::new("   ", "ignored")));
    assert_eq!(controller.view_mode(), ViewMode::Add);
    assert!(controller.form().is_some());
    assert!(controller.tasks().is_empty());
}

#[test]
fn cancel_add_discards_input() {
    let mut controller = controller();
    controller.start_add();
    controller.form_mut().unwrap().set_title("Half typed");
    controller.cancel_form();
    assert_eq!(controller.view_mode(), ViewMode::List);
    assert!(controller.form().is_none());
    assert!(controller.tasks().is_empty());
}

#[test]
fn submit_form_uses_draft_fields() {
    let mut controller = controller();
    controller.start_add();
    let form = controller.form_mut().unwrap();
    form.set_title("Call plumber");
    form.set_description("kitchen sink");
    assert!(controller.submit_form());

    let task = &controller.tasks()[0];
    assert_eq!(task.title, "Call plumber");
    assert_eq!(task.description, "kitchen sink");
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(controller.view_mode(), ViewMode::List);
}

#[test]
fn edit_updates_in_place_and_clears_target() {
    let mut controller = controller();
    let first = add(&mut controller, "Draft post", "");
    let second = add(&mut controller, "Walk dog", "");
    let created_at = controller.store().get(&first).unwrap().created_at;

    assert!(controller.start_edit(&first));
    assert_eq!(controller.view_mode(), ViewMode::Edit);
    assert_eq!(controller.editing_task().map(|t| t.id.as_str()), Some(first.as_str()));

    let saved = controller.save_form(
        TaskFields::new("Publish post", "final pass").with_status(TaskStatus::InProgress),
    );
    assert!(saved);
    assert_eq!(controller.view_mode(), ViewMode::List);
    assert!(controller.editing_task().is_none());

    let edited = controller.store().get(&first).unwrap();
    assert_eq!(edited.title, "Publish post");
    assert_eq!(edited.status, TaskStatus::InProgress);
    assert_eq!(edited.created_at, created_at);
    let order: Vec<_> = controller.tasks().iter().map(|t| t.id.clone()).collect();
    assert_eq!(order, vec![second, first]);
}

#[test]
fn edit_of_task_deleted_meanwhile_is_silent() {
    let mut controller = controller();
    let id = add(&mut controller, "Vanishing", "");
    assert!(controller.start_edit(&id));

    controller.store.remove(&id);

    assert!(controller.save_form(TaskFields::new("Still here?", "")));
    assert!(controller.tasks().is_empty());
    assert_eq!(controller.view_mode(), ViewMode::List);
}

#[test]
fn start_edit_with_unknown_id_stays_on_list() {
    let mut controller = controller();
    assert!(!controller.start_edit("missing"));
    assert_eq!(controller.view_mode(), ViewMode::List);
    assert!(controller.editing_task().is_none());
}

#[test]
fn mode_changes_only_start_from_list() {
    let mut controller = controller();
    let id = add(&mut controller, "Anchor", "");
    controller.start_add();
    assert!(!controller.start_edit(&id));
    assert!(!controller.start_add());
    assert_eq!(controller.view_mode(), ViewMode::Add);
}

#[test]
fn edit_with_blank_title_keeps_target() {
    let mut controller = controller();
    let id = add(&mut controller, "Water plants", "balcony");
    assert!(controller.start_edit(&id));

    assert!(!controller.save_form(TaskFields::new("  ", "x")));
    assert_eq!(controller.view_mode(), ViewMode::Edit);
    assert_eq!(controller.editing_task().map(|t| t.id.as_str()), Some(id.as_str()));
    assert!(controller.form().is_some());

    let stored = controller.store().get(&id).unwrap();
    assert_eq!(stored.title, "Water plants");
    assert_eq!(stored.description, "balcony");
}

#[test]
fn cancel_edit_clears_target() {
    let mut controller = controller();
    let id = add(&mut controller, "Water plants", "balcony");
    assert!(controller.start_edit(&id));
    controller.form_mut().unwrap().set_title("Water ferns");

    controller.cancel_form();
    assert_eq!(controller.view_mode(), ViewMode::List);
    assert!(controller.editing_task().is_none());
    assert!(controller.form().is_none());
    assert_eq!(controller.store().get(&id).unwrap().title, "Water plants");
}

#[test]
fn cancel_delete_keeps_task() {
    let mut controller = controller();
    let id = add(&mut controller, "Keep", "");
    controller.request_delete(&id);
    controller.cancel_delete();
    assert!(!controller.confirm_delete());
    assert_eq!(controller.tasks().len(), 1);
}

#[test]
fn confirm_delete_of_stale_id_is_no_op() {
    let mut controller = controller();
    add(&mut controller, "Other", "");
    controller.request_delete("gone");
    assert!(!controller.confirm_delete());
    assert_eq!(controller.tasks().len(), 1);
    assert!(controller.delete_id().is_none());
}

#[test]
fn filter_change_persists_and_restores() {
    let mut controller = controller();
    controller.set_status_filter(FilterStatus::Incomplete);
    assert_eq!(
        controller
            .store()
            .persistence()
            .store()
            .get(FILTER_KEY)
            .unwrap()
            .as_deref(),
        Some("INCOMPLETE")
    );

    let restored = Controller::new(Persistence::new(
        MemoryStore::new().with_entry(FILTER_KEY, "COMPLETED"),
    ));
    assert_eq!(restored.status_filter(), FilterStatus::Completed);
}

#[test]
fn read_model_reflects_filter_search_and_sections() {
    let mut controller = controller();
    add(&mut controller, "Foo report", "");
    let done = add(&mut controller, "Bar errand", "about foo");
    add(&mut controller, "Unrelated", "");
    controller.toggle_complete(&done);

    controller.set_status_filter(FilterStatus::Incomplete);
    controller.set_search_query("FOO");
    controller.toggle_section(TaskStatus::Pending);

    let model = controller.read_model();
    let statuses: Vec<_> = model.sections.iter().map(SectionView::status).collect();
    assert_eq!(statuses, vec![TaskStatus::InProgress, TaskStatus::Pending]);
    assert_eq!(model.sections[1].count(), 1);
    assert!(!model.sections[1].expanded);
    assert!(model.sections[0].expanded);
    assert_eq!(model.search_query, "FOO");
    assert_eq!(model.status_filter, FilterStatus::Incomplete);
    assert!(!model.delete_pending);
}

#[test]
fn cycle_policy_walks_lifecycle() {
    let mut controller = controller().with_policy(TransitionPolicy::Cycle);
    let id = add(&mut controller, "Ship release", "");

    assert_eq!(controller.toggle_complete(&id), None);
    assert_eq!(controller.apply(&id, TaskAction::Complete), None);
    assert_eq!(
        controller.apply(&id, TaskAction::Start).unwrap().status,
        TaskStatus::InProgress
    );
    assert_eq!(
        controller.apply(&id, TaskAction::Complete).unwrap().status,
        TaskStatus::Completed
    );
    assert!(!controller.start_edit(&id));
    assert_eq!(
        controller.actions_for(&id),
        vec![TaskAction::Reopen, TaskAction::MoveToPending, TaskAction::Delete]
    );
    assert_eq!(
        controller.apply(&id, TaskAction::Reopen).unwrap().status,
        TaskStatus::InProgress
    );
    assert_eq!(
        controller.apply(&id, TaskAction::MoveToPending).unwrap().status,
        TaskStatus::Pending
    );
}

#[test]
fn transitions_on_unknown_ids_are_ignored() {
    let mut controller = controller();
    assert_eq!(controller.toggle_complete("nope"), None);
    assert!(controller.actions_for("nope").is_empty());
}

#[test]
fn telemetry_tracks_mutations_and_rejections() {
    let mut controller = controller();
    let id = add(&mut controller, "Tracked", "");
    controller.start_add();
    controller.save_form(TaskFields::new("", ""));
    controller.cancel_form();
    controller.toggle_complete(&id);

    if !controller.telemetry().is_enabled() {
        return;
    }
    let events = controller.telemetry().events();
    assert_eq!(events[0], TelemetryEvent::SessionStarted { tasks: 0 });
    assert_eq!(events[1], TelemetryEvent::TaskAdded(id.clone()));
    assert_eq!(
        events[2],
        TelemetryEvent::SubmissionRejected("Task title cannot be empty".into())
    );
    assert_eq!(
        events[3],
        TelemetryEvent::StatusChanged {
            id,
            status: TaskStatus::Completed
        }
    );
}

#[test]
fn open_restores_state_from_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf());

    let milk_id = {
        let mut controller = Controller::open(&config).unwrap();
        controller.start_add();
        controller.save_form(TaskFields::new("Buy milk", ""));
        controller.start_add();
        controller.save_form(TaskFields::new("Water plants", "balcony"));

        let id = controller.tasks()[1].id.clone();
        controller.toggle_complete(&id);
        controller.set_status_filter(FilterStatus::Completed);
        id
    };

    let mut controller = Controller::open(&config).unwrap();
    assert_eq!(controller.policy(), TransitionPolicy::Toggle);
    assert_eq!(controller.view_mode(), ViewMode::List);
    assert_eq!(controller.tasks().len(), 2);
    assert_eq!(controller.tasks()[0].description, "balcony");

    let model = controller.read_model();
    assert_eq!(model.status_filter, FilterStatus::Completed);
    assert_eq!(model.sections.len(), 1);
    assert_eq!(model.sections[0].status(), TaskStatus::Completed);
    assert_eq!(model.sections[0].bucket.tasks[0].id, milk_id);

    controller.request_delete(&milk_id);
    assert!(controller.confirm_delete());
    drop(controller);

    let reopened = Controller::open(&config.with_transition_policy(TransitionPolicy::Cycle)).unwrap();
    assert_eq!(reopened.policy(), TransitionPolicy::Cycle);
    assert_eq!(reopened.tasks().len(), 1);
    assert_eq!(reopened.tasks()[0].title, "Water plants");
}

#[test]
fn store_level_adds_show_up_in_projection() {
    let mut controller = controller();
    controller
        .store
        .add(NewTask::new("Direct").with_status(TaskStatus::InProgress));
    assert_eq!(count(&controller, TaskStatus::InProgress), 1);
}
