// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reducer: one pure step from a state and an action to the next state.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use mindmap_edit::{AllowAll, Commands, MoveGuard, NewNode, Rejection, TypeRules};
use mindmap_search::SearchScope;
use mindmap_tree::{Layout, MonospaceMeasure, Node, NodeId, NodeType, Schema, TextMeasure};

use crate::action::{Action, Changes, Navigation};
use crate::focus::FocusState;
use crate::state::EditorState;

/// Outcome of one reducer step.
#[derive(Clone, Debug, PartialEq)]
pub struct Reduced {
    /// The next state. Equal to the input when the action was rejected.
    pub state: EditorState,
    /// Whether the action took effect.
    pub outcome: Result<(), Rejection>,
    /// What differs between the input and [`Reduced::state`].
    pub changes: Changes,
}

impl Reduced {
    /// Whether the action took effect.
    pub fn is_applied(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Host configuration for the reducer.
///
/// An `Editor` holds no editing state of its own; it is the layout engine,
/// constraint table, move guard and schema variant that every step consults.
/// States flow through [`Editor::apply`] by value.
pub struct Editor<M = MonospaceMeasure> {
    /// Layout engine applied after every structural edit.
    pub layout: Layout<M>,
    /// Type-constraint table.
    pub rules: TypeRules,
    /// Schema variant of the trees this editor works on.
    pub schema: Schema,
    guard: Box<dyn MoveGuard>,
}

impl<M: fmt::Debug> fmt::Debug for Editor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("layout", &self.layout)
            .field("rules", &self.rules)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Schema::Minimal)
    }
}

impl Editor {
    /// An editor with the default layout, no type rules and no move veto.
    pub fn new(schema: Schema) -> Self {
        Self::with_layout(schema, Layout::default())
    }
}

impl<M: TextMeasure> Editor<M> {
    /// An editor with a custom layout engine.
    pub fn with_layout(schema: Schema, layout: Layout<M>) -> Self {
        Self {
            layout,
            rules: TypeRules::new(),
            schema,
            guard: Box::new(AllowAll),
        }
    }

    /// Replace the type-constraint table.
    #[must_use]
    pub fn with_rules(mut self, rules: TypeRules) -> Self {
        self.rules = rules;
        self
    }

    /// Install a move veto.
    #[must_use]
    pub fn with_guard(mut self, guard: impl MoveGuard + 'static) -> Self {
        self.guard = Box::new(guard);
        self
    }

    /// The scope searches run with for this editor's schema.
    pub fn search_scope(&self) -> SearchScope {
        SearchScope::for_schema(self.schema)
    }

    /// Structural commands bound to this editor's collaborators.
    pub fn commands(&self) -> Commands<'_, M> {
        Commands::new(&self.layout, &self.rules, self.guard.as_ref())
    }

    /// A fresh state showing `root`, laid out, with nothing selected.
    pub fn load(&self, root: &Node) -> EditorState {
        EditorState {
            root: Some(self.layout.apply(root)),
            ..EditorState::default()
        }
    }

    /// Apply one action to `state`.
    ///
    /// `state` is never modified. A rejected action yields an equal state,
    /// empty [`Changes`] and the reason in [`Reduced::outcome`].
    pub fn apply(&self, state: &EditorState, action: &Action) -> Reduced {
        match self.reduce(state, action) {
            Ok(next) => Reduced {
                changes: Changes::between(state, &next),
                state: next,
                outcome: Ok(()),
            },
            Err(reason) => {
                tracing::debug!(%reason, undoable = action.is_undoable(), "action rejected");
                Reduced {
                    state: state.clone(),
                    outcome: Err(reason),
                    changes: Changes::empty(),
                }
            }
        }
    }

    fn reduce(&self, state: &EditorState, action: &Action) -> Result<EditorState, Rejection> {
        if state.read_only && action.needs_write() {
            return Err(Rejection::ReadOnly);
        }
        let commands = self.commands();
        let tree = || state.root.as_ref().ok_or(Rejection::EmptyTree);
        let mut next = state.clone();

        match action {
            Action::Add {
                parent,
                text,
                node_type,
            } => {
                let id = next.mint_id();
                let new = new_node(id, text, node_type);
                let added = commands.add(tree()?, parent.as_ref(), new)?;
                next.root = Some(added.root);
                next.focus = FocusState::Selected(added.id);
            }
            Action::AddSibling {
                sibling,
                text,
                node_type,
            } => {
                let id = next.mint_id();
                let new = new_node(id, text, node_type);
                let added = commands.add_sibling(tree()?, sibling, new)?;
                next.root = Some(added.root);
                next.focus = FocusState::Selected(added.id);
            }
            Action::Delete(id) => {
                let deleted = commands.delete(tree()?, id)?;
                next.root = Some(deleted.root);
                next.focus = FocusState::Selected(deleted.select);
            }
            Action::Move { node, new_parent } => {
                next.root = Some(commands.move_node(tree()?, node, new_parent)?.root);
            }
            Action::UpdateText { node, text } => {
                next.root = Some(commands.update_text(tree()?, node, text.as_str())?);
            }
            Action::UpdatePriority { node, level } => {
                next.root = Some(commands.update_priority(tree()?, node, *level)?);
            }
            Action::UpdateStyle { node, style } => {
                next.root = Some(commands.update_style(tree()?, node, style.clone())?);
            }
            Action::ToggleCollapse(id) => {
                next.root = Some(commands.toggle_collapse(tree()?, id)?.root);
            }
            Action::SetAllCollapsed(collapsed) => {
                next.root = Some(commands.set_all_collapsed(tree()?, *collapsed));
            }
            Action::Import(root) => {
                next.root = Some(commands.import(root, self.schema)?);
            }
            Action::Select(None) => next.focus = FocusState::None,
            Action::Select(Some(id)) => {
                require(tree()?, id)?;
                next.focus.select(id.clone());
            }
            Action::BeginEdit(id) => {
                require(tree()?, id)?;
                next.focus.begin_edit(id.clone());
            }
            Action::EndEdit => next.focus.end_edit(),
            Action::Navigate(direction) => {
                if let Some(target) = navigate(state.root.as_ref(), &state.focus, *direction) {
                    next.focus.select(target);
                }
            }
            Action::SetViewport(viewport) => next.viewport = *viewport,
            Action::SetSearchTerm(term) => {
                next.search
                    .set_term(state.root.as_ref(), term.as_str(), self.search_scope());
            }
            Action::NextMatch => {
                next.search.next();
            }
            Action::PreviousMatch => {
                next.search.prev();
            }
            Action::SetReadOnly(read_only) => {
                next.read_only = *read_only;
                if *read_only {
                    next.focus.exit_edit();
                }
            }
        }

        if action.is_undoable() {
            self.reconcile(&mut next);
        }
        Ok(next)
    }

    /// Bring search results and focus in line with the state's tree.
    pub(crate) fn reconcile(&self, state: &mut EditorState) {
        let root = state.root.as_ref();
        state.search.refresh(root, self.search_scope());
        state.focus.retain_in(root);
        state.focus.reveal_in(root);
    }
}

fn new_node(id: NodeId, text: &str, node_type: &Option<NodeType>) -> NewNode {
    NewNode {
        id,
        text: String::from(text),
        node_type: node_type.clone(),
    }
}

fn require<'t>(root: &'t Node, id: &NodeId) -> Result<&'t Node, Rejection> {
    root.find(id).ok_or_else(|| Rejection::NodeNotFound(id.clone()))
}

/// Target of a keyboard move, or `None` when there is nowhere to go.
///
/// Without a selection every direction lands on the root.
fn navigate(root: Option<&Node>, focus: &FocusState, direction: Navigation) -> Option<NodeId> {
    let root = root?;
    let Some(current) = focus.selected() else {
        return Some(root.id.clone());
    };
    let found = root.find_with_parent(current)?;
    let target = match direction {
        Navigation::Parent => found.parent?,
        Navigation::FirstChild => found.node.visible_children().first()?,
        Navigation::NextSibling | Navigation::PrevSibling => {
            let siblings = &found.parent?.children;
            let at = siblings.iter().position(|c| c.id == *current)?;
            let to = match direction {
                Navigation::NextSibling => at + 1,
                _ => at.checked_sub(1)?,
            };
            siblings.get(to)?
        }
    };
    Some(target.id.clone())
}
