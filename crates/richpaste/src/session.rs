//! PasteSession - the paste / edit / format cycle around an editor widget.
//!
//! The session owns the current document and its serialized markup. Every
//! content-changing edit serializes the new document; once a paste has armed
//! the format flag, the markup is also flattened and deserialized again to
//! produce the next document. Each cycle runs once, to completion.

use indexmap::IndexMap;
use richpaste_core::{render_tag, serialize, Document, Node, Options, Schema};

use crate::deserialize::{DeserializeOptions, Deserializer};
use crate::flatten::flatten;
use crate::html::parse_fragment;
use crate::{EditorError, Result};

/// Editor widget operations the session drives
pub trait Editor {
    /// Insert a deserialized fragment at the current selection
    fn insert_fragment(&mut self, fragment: &Document) -> std::result::Result<(), EditorError>;

    fn undo(&mut self);

    fn redo(&mut self);

    fn delete_selection(&mut self);
}

/// Single-slot markup store
pub trait Storage {
    fn load(&self, key: &str) -> Option<String>;

    fn store(&mut self, key: &str, markup: &str);
}

/// Storage kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: IndexMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn store(&mut self, key: &str, markup: &str) {
        self.slots.insert(key.to_string(), markup.to_string());
    }
}

/// Storage that keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStorage;

impl Storage for NullStorage {
    fn load(&self, _key: &str) -> Option<String> {
        None
    }

    fn store(&mut self, _key: &str, _markup: &str) {}
}

/// Clipboard payload of a paste event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Html(String),
    Text(String),
    /// Files or anything else the editor handles itself
    Other,
}

/// What the session did with a paste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The fragment was handed to the editor
    Inserted,
    /// The editor rejected the fragment; nothing changed
    Failed,
    /// Not HTML; left to the editor's default handling
    Deferred,
}

/// When the format flag is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    /// Once armed by a paste, every later edit is formatted
    #[default]
    Sticky,
    /// Disarm after the first format following a paste
    OncePerPaste,
}

/// How the preview surface shows the markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Rendered as HTML
    #[default]
    Html,
    /// Raw markup shown as text
    Text,
}

/// The preview surface: replaced wholesale on every update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub mode: PreviewMode,
    pub markup: String,
}

impl Preview {
    /// Text a reader sees on the surface
    pub fn display_text(&self) -> String {
        match self.mode {
            PreviewMode::Text => self.markup.clone(),
            PreviewMode::Html => parse_fragment(&self.markup).text_content(),
        }
    }
}

/// Diagnostic events a host may subscribe to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Pasted { html: String, fragment: Document },
    PasteFailed { error: String },
    Serialized { markup: String },
    SerializeFailed { error: String },
    Formatted { from: String, to: String },
    PreviewUpdated { mode: PreviewMode },
}

/// Options for PasteSession
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Storage slot for the last serialized markup
    pub storage_key: String,

    /// Markup the session starts from
    pub initial_markup: String,

    /// Start from the stored markup when there is one
    pub restore_from_storage: bool,

    /// When a paste-armed format flag is cleared
    pub format_policy: FormatPolicy,

    /// Initial preview mode
    pub preview_mode: PreviewMode,

    /// Markup serialization options
    pub serialize: Options,

    /// Markup deserialization options
    pub deserialize: DeserializeOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            storage_key: "content".to_string(),
            initial_markup: "<p></p>".to_string(),
            restore_from_storage: false,
            format_policy: FormatPolicy::Sticky,
            preview_mode: PreviewMode::Html,
            serialize: Options::default(),
            deserialize: DeserializeOptions::default(),
        }
    }
}

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// State of one editing surface
pub struct PasteSession {
    options: SessionOptions,
    deserializer: Deserializer,
    value: Document,
    content: String,
    should_format: bool,
    preview: Preview,
    storage: Box<dyn Storage>,
    listeners: Vec<Listener>,
}

impl PasteSession {
    /// Create a session with default options and no storage
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default(), NullStorage)
    }

    /// Create a session with custom options and storage
    pub fn with_options(options: SessionOptions, storage: impl Storage + 'static) -> Self {
        let deserializer = Deserializer::with_options(options.deserialize.clone());

        let stored = if options.restore_from_storage {
            storage.load(&options.storage_key)
        } else {
            None
        };
        let content = stored.unwrap_or_else(|| options.initial_markup.clone());
        let value = deserializer.deserialize_html(&content);
        let preview = Preview {
            mode: options.preview_mode,
            markup: content.clone(),
        };

        Self {
            options,
            deserializer,
            value,
            content,
            should_format: false,
            preview,
            storage: Box::new(storage),
            listeners: Vec::new(),
        }
    }

    /// Subscribe to diagnostic events
    pub fn subscribe<F>(&mut self, listener: F) -> &mut Self
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Current document
    pub fn value(&self) -> &Document {
        &self.value
    }

    /// Markup of the current document
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Whether edits are currently being formatted
    pub fn should_format(&self) -> bool {
        self.should_format
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Schema to hand to the editor widget
    pub fn schema(&self) -> &Schema {
        &self.options.serialize.schema
    }

    /// Access the deserializer, e.g. to add custom rules
    pub fn deserializer_mut(&mut self) -> &mut Deserializer {
        &mut self.deserializer
    }

    /// Node render callback for the editor widget
    pub fn render_tag(&self, node: &Node) -> Option<&'static str> {
        render_tag(node, &self.options.serialize)
    }

    /// Handle a paste event.
    ///
    /// HTML is deserialized and inserted through the editor; a failed insert
    /// is logged and leaves the session untouched.
    pub fn on_paste(&mut self, editor: &mut dyn Editor, transfer: &Transfer) -> PasteOutcome {
        let Transfer::Html(html) = transfer else {
            return PasteOutcome::Deferred;
        };

        match self.try_paste(editor, html) {
            Ok(fragment) => {
                log::debug!("pasted fragment with {} top-level nodes", fragment.nodes.len());
                self.should_format = true;
                self.emit(SessionEvent::Pasted {
                    html: html.clone(),
                    fragment,
                });
                PasteOutcome::Inserted
            }
            Err(err) => {
                log::warn!("paste failed: {err}");
                self.emit(SessionEvent::PasteFailed {
                    error: err.to_string(),
                });
                PasteOutcome::Failed
            }
        }
    }

    fn try_paste(&self, editor: &mut dyn Editor, html: &str) -> Result<Document> {
        let fragment = self.deserializer.deserialize_html(html);
        editor.insert_fragment(&fragment)?;
        Ok(fragment)
    }

    /// Handle a change notification carrying the editor's new document.
    ///
    /// Unchanged documents are ignored. A document that fails to serialize is
    /// still adopted, but the markup and the preview keep their old values.
    pub fn on_change(&mut self, value: Document) {
        if value == self.value {
            return;
        }

        match self.try_serialize(&value) {
            Ok(markup) => {
                log::debug!("serialized document: {markup}");
                self.storage.store(&self.options.storage_key, &markup);
                self.content = markup.clone();
                self.value = value;
                self.emit(SessionEvent::Serialized { markup });

                if self.should_format {
                    self.format_content();
                } else {
                    self.update_preview();
                }
            }
            Err(err) => {
                log::warn!("serialize failed: {err}");
                self.emit(SessionEvent::SerializeFailed {
                    error: err.to_string(),
                });
                self.value = value;
            }
        }
    }

    fn try_serialize(&self, value: &Document) -> Result<String> {
        Ok(serialize(value, &self.options.serialize)?)
    }

    /// Flatten the current markup and rebuild the document from it
    pub fn format_content(&mut self) {
        // Render into the preview first, as the flattener walks rendered markup
        self.preview.markup = self.content.clone();
        let rendered = parse_fragment(&self.content);
        let flattened = flatten(&rendered);
        log::debug!("formatted {:?} into {:?}", self.content, flattened);

        let from = std::mem::replace(&mut self.content, flattened.clone());
        self.value = self.deserializer.deserialize_html(&self.content);
        if self.options.format_policy == FormatPolicy::OncePerPaste {
            self.should_format = false;
        }

        self.emit(SessionEvent::Formatted {
            from,
            to: flattened,
        });
        self.update_preview();
    }

    /// Switch the preview between HTML and raw text
    pub fn toggle_preview_text(&mut self) {
        self.preview.mode = match self.preview.mode {
            PreviewMode::Html => PreviewMode::Text,
            PreviewMode::Text => PreviewMode::Html,
        };
        self.update_preview();
    }

    fn update_preview(&mut self) {
        self.preview.markup = self.content.clone();
        let mode = self.preview.mode;
        self.emit(SessionEvent::PreviewUpdated { mode });
    }

    /// Whether the document holds at least one block
    pub fn has_block(&self) -> bool {
        self.value.has_blocks()
    }

    /// Forward an undo to the editor
    pub fn undo(&self, editor: &mut dyn Editor) {
        editor.undo();
    }

    /// Forward a redo to the editor
    pub fn redo(&self, editor: &mut dyn Editor) {
        editor.redo();
    }

    /// Delete the editor's selection when there is anything to delete
    pub fn delete_selection(&self, editor: &mut dyn Editor) {
        if self.has_block() {
            editor.delete_selection();
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for PasteSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use richpaste_core::{Block, BlockType, Inline};

    use super::*;

    #[derive(Default)]
    struct MockEditor {
        inserted: Vec<Document>,
        fail: bool,
        calls: Vec<&'static str>,
    }

    impl Editor for MockEditor {
        fn insert_fragment(
            &mut self,
            fragment: &Document,
        ) -> std::result::Result<(), EditorError> {
            if self.fail {
                return Err(EditorError::new("selection is read-only"));
            }
            self.inserted.push(fragment.clone());
            Ok(())
        }

        fn undo(&mut self) {
            self.calls.push("undo");
        }

        fn redo(&mut self) {
            self.calls.push("redo");
        }

        fn delete_selection(&mut self) {
            self.calls.push("delete");
        }
    }

    /// Storage the test keeps a handle to after moving it into a session
    #[derive(Clone, Default)]
    struct SharedStorage(Rc<RefCell<MemoryStorage>>);

    impl Storage for SharedStorage {
        fn load(&self, key: &str) -> Option<String> {
            self.0.borrow().load(key)
        }

        fn store(&mut self, key: &str, markup: &str) {
            self.0.borrow_mut().store(key, markup);
        }
    }

    impl SharedStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).map(str::to_string)
        }
    }

    fn events(session: &mut PasteSession) -> Rc<RefCell<Vec<SessionEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    #[test]
    fn test_initial_state() {
        let session = PasteSession::new();
        assert_eq!(session.content(), "<p></p>");
        assert_eq!(
            session.value().nodes,
            vec![Block::paragraph(vec![Node::text("")]).into()]
        );
        assert!(!session.should_format());
        assert!(session.schema().is_void(&BlockType::Image));
    }

    #[test]
    fn test_non_html_paste_is_deferred() {
        let mut session = PasteSession::new();
        let mut editor = MockEditor::default();
        let outcome = session.on_paste(&mut editor, &Transfer::Text("plain".into()));
        assert_eq!(outcome, PasteOutcome::Deferred);
        assert!(editor.inserted.is_empty());
        assert!(!session.should_format());
    }

    #[test]
    fn test_paste_inserts_fragment_and_arms_format() {
        let mut session = PasteSession::new();
        let log = events(&mut session);
        let mut editor = MockEditor::default();

        let outcome = session.on_paste(
            &mut editor,
            &Transfer::Html("<div><p>Hello</p><img src=\"x.png\"></div>".into()),
        );

        assert_eq!(outcome, PasteOutcome::Inserted);
        assert!(session.should_format());
        assert_eq!(
            editor.inserted[0].nodes,
            vec![Block::div(vec![
                Block::paragraph(vec![Node::text("Hello")]).into(),
                Block::image(Some("x.png")).into(),
            ])
            .into()]
        );
        assert!(matches!(log.borrow()[0], SessionEvent::Pasted { .. }));
    }

    #[test]
    fn test_failed_paste_leaves_state_unchanged() {
        let mut session = PasteSession::new();
        let log = events(&mut session);
        let mut editor = MockEditor {
            fail: true,
            ..Default::default()
        };

        let outcome = session.on_paste(&mut editor, &Transfer::Html("<p>x</p>".into()));

        assert_eq!(outcome, PasteOutcome::Failed);
        assert!(!session.should_format());
        assert_eq!(session.content(), "<p></p>");
        assert_eq!(
            *log.borrow(),
            vec![SessionEvent::PasteFailed {
                error: "Editor error: selection is read-only".into()
            }]
        );
    }

    #[test]
    fn test_change_without_format_updates_preview_and_storage() {
        let storage = SharedStorage::default();
        let mut session = PasteSession::with_options(SessionOptions::default(), storage.clone());
        let doc = Document::new(vec![
            Block::div(vec![Block::paragraph(vec![Node::text("a")]).into()]).into(),
        ]);

        session.on_change(doc.clone());

        assert_eq!(session.content(), "<div><p>a</p></div>");
        assert_eq!(session.preview().markup, "<div><p>a</p></div>");
        assert_eq!(session.value(), &doc);
        assert_eq!(storage.get("content").as_deref(), Some("<div><p>a</p></div>"));
    }

    #[test]
    fn test_storage_keeps_markup_from_before_format() {
        let storage = SharedStorage::default();
        let options = SessionOptions {
            storage_key: "draft".into(),
            ..Default::default()
        };
        let mut session = PasteSession::with_options(options, storage.clone());
        let mut editor = MockEditor::default();
        session.on_paste(&mut editor, &Transfer::Html("<p>x</p>".into()));

        let doc = Document::new(vec![
            Block::div(vec![Block::paragraph(vec![Node::text("a")]).into()]).into(),
        ]);
        session.on_change(doc);

        assert_eq!(session.content(), "<p>a</p>");
        assert_eq!(storage.get("draft").as_deref(), Some("<div><p>a</p></div>"));
        assert_eq!(storage.get("content"), None);
    }

    #[test]
    fn test_serialize_failure_stores_nothing() {
        let storage = SharedStorage::default();
        let mut session = PasteSession::with_options(SessionOptions::default(), storage.clone());
        let doc = Document::new(vec![
            Block::new(BlockType::Other("heading".into()), vec![]).into(),
        ]);

        session.on_change(doc);

        assert_eq!(storage.get("content"), None);
    }

    #[test]
    fn test_unchanged_document_is_ignored() {
        let mut session = PasteSession::new();
        let log = events(&mut session);
        let same = session.value().clone();
        session.on_change(same);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_change_after_paste_formats() {
        let mut session = PasteSession::new();
        let mut editor = MockEditor::default();
        session.on_paste(&mut editor, &Transfer::Html("<p>x</p>".into()));

        let edited = Document::new(vec![Block::div(vec![
            Block::paragraph(vec![
                Node::text("Hello"),
                Inline::link(Some("https://example.com"), vec![Node::text("world")]).into(),
            ])
            .into(),
            Block::image(Some("x.png")).into(),
        ])
        .into()]);
        session.on_change(edited);

        assert_eq!(session.content(), "<p>Hello world</p><img src=\"x.png\"/>");
        assert_eq!(
            session.value().nodes,
            vec![
                Block::paragraph(vec![Node::text("Hello world")]).into(),
                Block::image(Some("x.png")).into(),
            ]
        );
        assert_eq!(session.preview().markup, session.content());
        // Sticky policy keeps formatting later edits
        assert!(session.should_format());
    }

    #[test]
    fn test_once_per_paste_policy_disarms() {
        let options = SessionOptions {
            format_policy: FormatPolicy::OncePerPaste,
            ..Default::default()
        };
        let mut session = PasteSession::with_options(options, NullStorage);
        let mut editor = MockEditor::default();
        session.on_paste(&mut editor, &Transfer::Html("<p>x</p>".into()));
        session.on_change(Document::new(vec![
            Block::paragraph(vec![Node::text("y")]).into(),
        ]));
        assert!(!session.should_format());
    }

    #[test]
    fn test_serialize_failure_keeps_markup() {
        let mut session = PasteSession::new();
        let log = events(&mut session);
        let doc = Document::new(vec![
            Block::new(BlockType::Other("heading".into()), vec![]).into(),
        ]);

        session.on_change(doc.clone());

        assert_eq!(session.content(), "<p></p>");
        assert_eq!(session.preview().markup, "<p></p>");
        assert_eq!(session.value(), &doc);
        assert!(matches!(
            log.borrow().as_slice(),
            [SessionEvent::SerializeFailed { .. }]
        ));
    }

    #[test]
    fn test_format_content_emits_from_and_to() {
        let options = SessionOptions {
            initial_markup: "<div><p><span>a</span><span>b</span></p></div>".into(),
            ..Default::default()
        };
        let mut session = PasteSession::with_options(options, NullStorage);
        let log = events(&mut session);

        session.format_content();

        assert_eq!(session.content(), "<p>a b</p>");
        assert_eq!(
            log.borrow()[0],
            SessionEvent::Formatted {
                from: "<div><p><span>a</span><span>b</span></p></div>".into(),
                to: "<p>a b</p>".into(),
            }
        );
    }

    #[test]
    fn test_toggle_preview_text() {
        let options = SessionOptions {
            initial_markup: "<p>a &amp; b</p>".into(),
            ..Default::default()
        };
        let mut session = PasteSession::with_options(options, NullStorage);
        assert_eq!(session.preview().display_text(), "a & b");

        session.toggle_preview_text();
        assert_eq!(session.preview().mode, PreviewMode::Text);
        assert_eq!(session.preview().display_text(), "<p>a &amp; b</p>");
    }

    #[test]
    fn test_restore_from_storage() {
        let mut storage = MemoryStorage::new();
        storage.store("content", "<p>saved</p>");

        let options = SessionOptions {
            restore_from_storage: true,
            ..Default::default()
        };
        let session = PasteSession::with_options(options, storage.clone());
        assert_eq!(session.content(), "<p>saved</p>");

        let session = PasteSession::with_options(SessionOptions::default(), storage);
        assert_eq!(session.content(), "<p></p>");
    }

    #[test]
    fn test_commands_are_forwarded() {
        let session = PasteSession::new();
        let mut editor = MockEditor::default();
        session.undo(&mut editor);
        session.redo(&mut editor);
        session.delete_selection(&mut editor);
        assert_eq!(editor.calls, vec!["undo", "redo", "delete"]);
    }

    #[test]
    fn test_render_tag_follows_serializer() {
        let session = PasteSession::new();
        assert_eq!(
            session.render_tag(&Inline::link(None, vec![]).into()),
            Some("span")
        );
        assert_eq!(session.render_tag(&Block::image(None).into()), Some("img"));
    }
}
