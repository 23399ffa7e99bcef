//! Editing session integration tests
//!
//! End-to-end scenarios through the public `Session` API plus property
//! tests over random operation sequences.

use builder_core::{
    BuilderConfig, DesignDocument, ElementId, ElementPatch, ElementType, JsonFilePersistence,
    Position, ResizeHandle, Session, Size, ViewportClass, MIN_ELEMENT_SIZE,
};
use proptest::prelude::*;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_resize_button_commits_one_entry_and_undoes() {
    let mut session = Session::new();
    let id = session.add_element(ElementType::Button);
    let button = session.element(id).expect("button added");
    assert_eq!(button.position, Position::new(100.0, 200.0));
    assert_eq!(button.size, Size::new(150.0, 40.0));

    let entries_before = session.history().len();
    session.pointer_down(250.0, 240.0);
    session.pointer_move(280.0, 255.0);
    session.pointer_move(300.0, 270.0);
    session.pointer_up(300.0, 270.0);

    assert_eq!(session.element(id).map(|e| e.size), Some(Size::new(200.0, 70.0)));
    assert_eq!(session.history().len(), entries_before + 1);

    assert!(session.undo());
    assert_eq!(session.element(id).map(|e| e.size), Some(Size::new(150.0, 40.0)));
}

#[test]
fn test_delete_then_undo_restores_same_element() {
    let mut session = Session::new();
    let id = session.add_element(ElementType::Quote);
    session.update_element(id, &ElementPatch::new().content("Stay hungry"));
    let original = session.element(id).cloned().expect("exists");

    assert!(session.delete_element(id));
    assert!(session.element(id).is_none());

    assert!(session.undo());
    assert_eq!(session.element(id), Some(&original));

    assert!(session.redo());
    assert!(session.element(id).is_none());
}

#[test]
fn test_duplicate_copies_content_and_offsets_position() {
    let mut session = Session::new();
    let id = session.add_element(ElementType::Heading);
    let source = session.element(id).cloned().expect("exists");
    let copy_id = session.duplicate_element(id).expect("source exists");
    let copy = session.element(copy_id).expect("copy exists");

    assert_ne!(copy_id, id);
    assert_eq!(copy.content, source.content);
    assert_eq!(copy.styles, source.styles);
    assert_eq!(
        copy.position,
        Position::new(source.position.x + 20.0, source.position.y + 20.0)
    );
    assert_eq!(session.selected_id(), Some(copy_id));
}

#[test]
fn test_undo_at_start_and_redo_at_tail_are_noops() {
    let mut session = Session::new();
    assert!(!session.undo());
    session.add_element(ElementType::Text);
    assert!(!session.redo());
    let elements = session.elements().to_vec();
    assert!(session.undo());
    assert!(!session.undo());
    assert!(session.redo());
    assert!(!session.redo());
    assert_eq!(session.elements(), elements.as_slice());
}

#[test]
fn test_every_builtin_type_adds_with_valid_geometry() {
    let mut session = Session::new();
    for ty in ElementType::BUILTIN {
        let id = session.add_element(ty.clone());
        let element = session.element(id).expect("added");
        assert!(element.has_valid_geometry(), "{ty} geometry");
    }
    let unknown = session.add_element(ElementType::from("marquee"));
    assert!(session.element(unknown).is_some_and(|e| e.has_valid_geometry()));
}

#[test]
fn test_history_limit_from_config() {
    let config = BuilderConfig::from_json(r#"{"historyLimit": 3}"#).expect("config");
    let mut session = Session::with_config(config);
    for _ in 0..10 {
        session.add_element(ElementType::Spacer);
    }
    assert_eq!(session.history().len(), 3);
    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.elements().len(), 8);
}

#[test]
fn test_custom_drop_point_and_offset() {
    let config = BuilderConfig::from_json(
        r#"{"dropPoint": {"x": 10, "y": 10}, "duplicateOffset": {"dx": 5, "dy": 0}}"#,
    )
    .expect("config");
    let mut session = Session::with_config(config);
    let id = session.add_element(ElementType::Icon);
    let copy = session.duplicate_element(id).expect("duplicated");
    assert_eq!(
        session.element(copy).map(|e| e.position),
        Some(Position::new(15.0, 10.0))
    );
}

#[test]
fn test_design_survives_file_persistence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let persistence = JsonFilePersistence::new(dir.path().join("designs").join("home.json"));

    let mut session = Session::new();
    session.add_element(ElementType::Hero);
    session.add_element(ElementType::PricingCard);
    session.set_viewport(ViewportClass::Mobile);
    session.save_to(&persistence);

    let mut reopened = Session::new();
    assert!(reopened.load_from(&persistence).expect("readable"));
    assert_eq!(reopened.elements(), session.elements());
    assert_eq!(reopened.viewport(), ViewportClass::Mobile);
    assert!(reopened.selected_id().is_none());
    assert!(!reopened.can_undo());
}

#[test]
fn test_document_with_unknown_type_loads_and_edits() {
    let json = r#"{
        "elements": [
            {"id": "0b6f7c1e-7f3c-4c2e-9a47-2a9a3c9f5d10", "type": "countdown",
             "content": "2027-01-01", "position": {"x": 0, "y": 0},
             "size": {"width": 300, "height": 80}}
        ],
        "viewportClass": "tablet",
        "savedAt": 1700000000000
    }"#;
    let document = DesignDocument::from_json(json).expect("valid document");
    let mut session = Session::from_document(document, BuilderConfig::default());
    let id = ElementId::parse("0b6f7c1e-7f3c-4c2e-9a47-2a9a3c9f5d10").expect("uuid");
    assert!(session.update_element(id, &ElementPatch::new().content("2028-01-01")));
    assert!(session.document().to_json().expect("json").contains("countdown"));
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Update(usize, String),
    Delete(usize),
    Duplicate(usize),
    Drag(usize, f32, f32),
    Resize(usize, usize, f32, f32),
    Undo,
    Redo,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..ElementType::BUILTIN.len()).prop_map(Op::Add),
        (any::<usize>(), "[a-z ]{0,12}").prop_map(|(i, s)| Op::Update(i, s)),
        any::<usize>().prop_map(Op::Delete),
        any::<usize>().prop_map(Op::Duplicate),
        (any::<usize>(), -500.0f32..500.0, -500.0f32..500.0)
            .prop_map(|(i, dx, dy)| Op::Drag(i, dx, dy)),
        (any::<usize>(), 0usize..8, -2000.0f32..2000.0, -2000.0f32..2000.0)
            .prop_map(|(i, h, dx, dy)| Op::Resize(i, h, dx, dy)),
        Just(Op::Undo),
        Just(Op::Redo),
    ]
}

fn pick(session: &Session, index: usize) -> Option<ElementId> {
    let elements = session.elements();
    (!elements.is_empty()).then(|| elements[index % elements.len()].id)
}

fn apply(session: &mut Session, op: &Op) {
    match op {
        Op::Add(i) => {
            session.add_element(ElementType::BUILTIN[*i].clone());
        }
        Op::Update(i, content) => {
            if let Some(id) = pick(session, *i) {
                session.update_element(id, &ElementPatch::new().content(content.clone()));
            }
        }
        Op::Delete(i) => {
            if let Some(id) = pick(session, *i) {
                session.delete_element(id);
            }
        }
        Op::Duplicate(i) => {
            if let Some(id) = pick(session, *i) {
                session.duplicate_element(id);
            }
        }
        Op::Drag(i, dx, dy) => {
            if let Some(id) = pick(session, *i) {
                let element = session.element(id).cloned().expect("picked");
                session.clear_selection();
                // Grab the centre so handles of other selections cannot interfere.
                let x = element.position.x + element.size.width / 2.0;
                let y = element.position.y + element.size.height / 2.0;
                session.pointer_down(x, y);
                session.pointer_move(x + dx, y + dy);
                session.pointer_up(x + dx, y + dy);
            }
        }
        Op::Resize(i, h, dx, dy) => {
            if let Some(id) = pick(session, *i) {
                session.select(id);
                let element = session.element(id).cloned().expect("picked");
                let handle = ResizeHandle::ALL[*h];
                let anchor = handle.anchor(element.position, element.size);
                session.pointer_down(anchor.x, anchor.y);
                session.pointer_move(anchor.x + dx, anchor.y + dy);
                session.pointer_up(anchor.x + dx, anchor.y + dy);
            }
        }
        Op::Undo => {
            session.undo();
        }
        Op::Redo => {
            session.redo();
        }
    }
}

proptest! {
    #[test]
    fn prop_undo_then_redo_restores_collection(ops in prop::collection::vec(arb_op(), 1..30)) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
        }
        let before = session.elements().to_vec();
        if session.undo() {
            prop_assert!(session.redo());
        }
        prop_assert_eq!(session.elements(), before.as_slice());
    }

    #[test]
    fn prop_geometry_floors_always_hold(ops in prop::collection::vec(arb_op(), 1..30)) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
            for element in session.elements() {
                prop_assert!(element.size.width >= MIN_ELEMENT_SIZE);
                prop_assert!(element.size.height >= MIN_ELEMENT_SIZE);
                prop_assert!(element.position.x >= 0.0);
                prop_assert!(element.position.y >= 0.0);
            }
        }
    }

    #[test]
    fn prop_ids_stay_unique(ops in prop::collection::vec(arb_op(), 1..30)) {
        let mut session = Session::new();
        for op in &ops {
            apply(&mut session, op);
        }
        let mut ids: Vec<_> = session.elements().iter().map(|e| e.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    #[test]
    fn prop_history_cursor_in_range(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut session = Session::with_config(BuilderConfig {
            history_limit: 5,
            ..BuilderConfig::default()
        });
        for op in &ops {
            apply(&mut session, op);
            let history = session.history();
            prop_assert!(history.len() <= 5);
            prop_assert!(history.cursor() < history.len());
        }
    }

    #[test]
    fn prop_inward_resize_never_below_floor(
        handle in 0usize..8,
        dx in -100_000.0f32..100_000.0,
        dy in -100_000.0f32..100_000.0,
    ) {
        let (position, size) = ResizeHandle::ALL[handle].resize(
            Position::new(100.0, 200.0),
            Size::new(150.0, 40.0),
            dx,
            dy,
        );
        prop_assert!(size.width >= MIN_ELEMENT_SIZE);
        prop_assert!(size.height >= MIN_ELEMENT_SIZE);
        prop_assert!(position.x >= 0.0);
        prop_assert!(position.y >= 0.0);
    }
}
