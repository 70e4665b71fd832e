//! Mutation and transaction tests against parsed documents

use anyhow::Result;
use diff_suggestion_editor::{
    EditorState, Mark, Mutation, MutationError, Node, Schema, Selection, StepMap,
};
use std::sync::Arc;

fn state(source: &str) -> Result<EditorState> {
    Ok(EditorState::from_markup(Arc::new(Schema::new()), source)?)
}

#[test]
fn test_replace_inside_marked_text() -> Result<()> {
    let state = state("<p>a<strong>bold</strong>c</p>")?;
    let mut tr = state.tr();
    // "bold" spans 2..6
    tr.insert_text("X", 3, 5)?;
    let next = state.apply(&tr)?;

    assert_eq!(next.to_markup(), "<p>a<strong>b</strong>X<strong>d</strong>c</p>");
    Ok(())
}

#[test]
fn test_delete_whole_paragraph() -> Result<()> {
    let state = state("<p>one</p><p>two</p>")?;
    let mut tr = state.tr();
    tr.delete(0, 5)?;
    let next = state.apply(&tr)?;

    assert_eq!(next.to_markup(), "<p>two</p>");
    assert_eq!(next.selection(), Selection::cursor(0));
    Ok(())
}

#[test]
fn test_insert_block_between_paragraphs() -> Result<()> {
    let state = state("<p>one</p><p>two</p>")?;
    let schema = Arc::clone(state.schema());
    let mut tr = state.tr();
    tr.insert(5, schema.paragraph(vec![Node::text("mid")]))?;

    let next = state.apply(&tr)?;
    assert_eq!(next.to_markup(), "<p>one</p><p>mid</p><p>two</p>");
    assert_eq!(tr.mapping().maps(), &[StepMap::new(5, 0, 5)]);
    Ok(())
}

#[test]
fn test_text_at_block_level_rejected() -> Result<()> {
    let state = state("<p>one</p>")?;
    let err = state.tr().insert(0, Node::text("loose")).unwrap_err();
    assert!(matches!(err, MutationError::ContentMismatch(_)));
    Ok(())
}

#[test]
fn test_partial_paragraph_range_rejected() -> Result<()> {
    let state = state("<p>one</p><p>two</p>")?;
    let err = state.tr().delete(2, 7).unwrap_err();
    assert_eq!(err, MutationError::CrossesNodeBoundary { from: 2, to: 7 });
    Ok(())
}

#[test]
fn test_sequence_of_edits_maps_positions() -> Result<()> {
    let state = state("<p>abcdef</p>")?;
    let mut tr = state.tr();
    tr.delete(2, 4)?; // "adef"
    tr.insert_text("XYZ", 1, 1)?; // "XYZadef"
    tr.insert_text("!", 8, 8)?; // "XYZadef!"

    assert_eq!(tr.doc().text_content(), "XYZadef!");
    // "e" was at 5 in the original document
    assert_eq!(tr.mapping().map(5), 6);
    assert_eq!(tr.mapping().map_node(2, 1), None);
    Ok(())
}

#[test]
fn test_mutation_serialization() -> Result<()> {
    let mutation = Mutation::Replace {
        from: 1,
        to: 3,
        content: vec![Node::marked_text("hi", vec![Mark::Italic])],
    };

    let json = serde_json::to_string(&mutation)?;
    assert!(json.contains(r#""kind":"Replace""#));

    let deserialized: Mutation = serde_json::from_str(&json)?;
    assert_eq!(mutation, deserialized);
    Ok(())
}
