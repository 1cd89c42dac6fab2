// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor facade.
//!
//! [`Editor`] owns one scene together with everything that reacts to it: the current tool,
//! the connection protocol, the selection, the undo history and the outbound event queue.
//! A UI layer forwards gestures to it and drains [`SceneEvent`]s back out.

use std::collections::VecDeque;
use std::fmt;

use log::debug;

use crate::connect::{CancelReason, ConnectionProtocol, PickOutcome};
use crate::events::SceneEvent;
use crate::format::{deserialize, serialize, DeserializeWarning, Document};
use crate::history::{Clock, History, HistoryError, HistoryPolicy, SystemClock};
use crate::model::{
    EdgeId, EdgeKind, EdgeStyle, NodeId, NodeKind, NodeStyle, Point, Scene, Transform,
};
use crate::ops::{apply_ops, ApplyError, ApplyResult, Op, SceneRef};
use crate::suggest::{
    plan_materialization, suggestion_request, MisuseCaseSuggester, MisuseSuggestion,
    SuggestError, SuggestionRequest,
};

/// What a click on the canvas or on a node means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    /// Clicking empty canvas places a node of this kind.
    Place(NodeKind),
    /// Clicking two nodes connects them with this kind.
    Connect(EdgeKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    Apply(ApplyError),
    History(HistoryError),
    Suggest(SuggestError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply(source) => source.fmt(f),
            Self::History(source) => source.fmt(f),
            Self::Suggest(source) => source.fmt(f),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Apply(source) => Some(source),
            Self::History(source) => Some(source),
            Self::Suggest(source) => Some(source),
        }
    }
}

impl From<ApplyError> for EditorError {
    fn from(source: ApplyError) -> Self {
        Self::Apply(source)
    }
}

impl From<HistoryError> for EditorError {
    fn from(source: HistoryError) -> Self {
        Self::History(source)
    }
}

impl From<SuggestError> for EditorError {
    fn from(source: SuggestError) -> Self {
        Self::Suggest(source)
    }
}

#[derive(Debug)]
pub struct Editor<C: Clock = SystemClock> {
    scene: Scene,
    tool: Tool,
    protocol: ConnectionProtocol,
    selection: Option<SceneRef>,
    history: History,
    clock: C,
    events: VecDeque<SceneEvent>,
}

impl Editor<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock, HistoryPolicy::default())
    }
}

impl Default for Editor<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Editor<C> {
    /// Starts with an empty scene and records it as the history baseline.
    pub fn with_clock(clock: C, policy: HistoryPolicy) -> Self {
        let mut editor = Self {
            scene: Scene::new(),
            tool: Tool::default(),
            protocol: ConnectionProtocol::new(),
            selection: None,
            history: History::new(policy),
            clock,
            events: VecDeque::new(),
        };
        editor.capture_baseline();
        editor
    }

    fn capture_baseline(&mut self) {
        let now = self.clock.now();
        self.history.capture(serialize(&self.scene), now);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn connection(&self) -> &ConnectionProtocol {
        &self.protocol
    }

    pub fn selection(&self) -> Option<&SceneRef> {
        self.selection.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.events.drain(..).collect()
    }

    fn emit(&mut self, event: SceneEvent) {
        self.events.push_back(event);
    }

    fn select(&mut self, selection: Option<SceneRef>) {
        if self.selection == selection {
            return;
        }
        self.selection = selection.clone();
        self.emit(SceneEvent::SelectionChanged(selection));
    }

    /// Runs `f` against the protocol and reports a step change if one happened.
    fn track_connection<R>(&mut self, f: impl FnOnce(&mut ConnectionProtocol) -> R) -> R {
        let before = (self.protocol.step(), self.protocol.armed_kind());
        let result = f(&mut self.protocol);
        let after = (self.protocol.step(), self.protocol.armed_kind());
        if before != after {
            self.emit(SceneEvent::ConnectionStepChanged { step: after.0, kind: after.1 });
        }
        result
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        let armed = match tool {
            Tool::Connect(kind) => Some(kind),
            Tool::Select | Tool::Place(_) => None,
        };
        self.track_connection(|protocol| protocol.arm(armed));
    }

    /// A click on a node. Returns the edge created when the click completes a connection.
    pub fn click_node(&mut self, node_id: &NodeId) -> Result<Option<EdgeId>, EditorError> {
        let Some(node) = self.scene.node(node_id) else {
            return Err(ApplyError::NodeNotFound { node_id: node_id.clone() }.into());
        };
        let kind = node.kind();

        if !matches!(self.tool, Tool::Connect(_)) {
            self.select(Some(SceneRef::Node(node_id.clone())));
            return Ok(None);
        }

        match self.track_connection(|protocol| protocol.pick(node_id, kind)) {
            Ok(PickOutcome::Ignored) | Ok(PickOutcome::SourceSelected { .. }) => Ok(None),
            Ok(PickOutcome::Ready {
                kind,
                source,
                target,
            }) => self.create_edge(kind, &source, &target).map(Some),
            Err(reason) => {
                self.emit(SceneEvent::validation(reason));
                Err(ApplyError::Rejected(reason).into())
            }
        }
    }

    pub fn click_edge(&mut self, edge_id: &EdgeId) -> Result<(), EditorError> {
        if self.scene.edge(edge_id).is_none() {
            return Err(ApplyError::EdgeNotFound { edge_id: edge_id.clone() }.into());
        }
        if self.tool == Tool::Select {
            self.select(Some(SceneRef::Edge(edge_id.clone())));
        }
        Ok(())
    }

    /// A click on empty canvas. Returns the node placed by a placement tool.
    pub fn click_canvas(&mut self, point: Point) -> Result<Option<NodeId>, EditorError> {
        match self.tool {
            Tool::Place(kind) => {
                let node_id = self.create_node(kind, point, kind.default_label())?;
                self.select(Some(SceneRef::Node(node_id.clone())));
                Ok(Some(node_id))
            }
            Tool::Connect(_) => {
                self.track_connection(|protocol| protocol.cancel(CancelReason::EmptyCanvas));
                Ok(None)
            }
            Tool::Select => {
                self.select(None);
                Ok(None)
            }
        }
    }

    pub fn press_escape(&mut self) {
        self.track_connection(|protocol| protocol.cancel(CancelReason::Escape));
        self.select(None);
    }

    /// Applies `ops` as one atomic batch and schedules a history capture.
    pub fn apply(&mut self, ops: &[Op]) -> Result<ApplyResult, EditorError> {
        let result = match apply_ops(&mut self.scene, ops) {
            Ok(result) => result,
            Err(err) => {
                match &err {
                    ApplyError::Rejected(reason) => self.emit(SceneEvent::validation(reason)),
                    ApplyError::InvalidTransform { .. } => self.emit(SceneEvent::validation(&err)),
                    _ => {}
                }
                return Err(err.into());
            }
        };

        if !result.delta.is_empty() {
            self.forget_removed(&result.delta.removed);
            let now = self.clock.now();
            self.history.request_capture(now);
        }
        Ok(result)
    }

    fn forget_removed(&mut self, removed: &[SceneRef]) {
        let source_removed = self
            .protocol
            .highlighted_source()
            .is_some_and(|source| removed.contains(&SceneRef::Node(source.clone())));
        if source_removed {
            self.track_connection(|protocol| protocol.cancel(CancelReason::SourceRemoved));
        }
        if self
            .selection
            .as_ref()
            .is_some_and(|selected| removed.contains(selected))
        {
            self.select(None);
        }
    }

    pub fn create_node(
        &mut self,
        kind: NodeKind,
        position: Point,
        label: impl Into<String>,
    ) -> Result<NodeId, EditorError> {
        let node_id = self.scene.allocate_node_id();
        self.apply(&[Op::AddNode {
            node_id: node_id.clone(),
            kind,
            label: label.into(),
            transform: Transform::from(position),
        }])?;
        Ok(node_id)
    }

    pub fn move_node(&mut self, node_id: &NodeId, transform: Transform) -> Result<(), EditorError> {
        self.apply(&[Op::SetTransform { node_id: node_id.clone(), transform }]).map(drop)
    }

    fn current_transform(&self, node_id: &NodeId) -> Result<Transform, EditorError> {
        self.scene
            .node(node_id)
            .map(|node| *node.transform())
            .ok_or_else(|| ApplyError::NodeNotFound { node_id: node_id.clone() }.into())
    }

    pub fn translate_node(
        &mut self,
        node_id: &NodeId,
        dx: f64,
        dy: f64,
    ) -> Result<(), EditorError> {
        let transform = self.current_transform(node_id)?.translated(dx, dy);
        self.move_node(node_id, transform)
    }

    pub fn scale_node(
        &mut self,
        node_id: &NodeId,
        scale_x: f64,
        scale_y: f64,
    ) -> Result<(), EditorError> {
        let transform = self.current_transform(node_id)?.scaled(scale_x, scale_y);
        self.move_node(node_id, transform)
    }

    pub fn rotate_node(&mut self, node_id: &NodeId, angle: f64) -> Result<(), EditorError> {
        let transform = self.current_transform(node_id)?.rotated(angle);
        self.move_node(node_id, transform)
    }

    pub fn set_node_label(
        &mut self,
        node_id: &NodeId,
        label: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.apply(&[Op::SetNodeLabel { node_id: node_id.clone(), label: label.into() }]).map(drop)
    }

    pub fn set_node_style(
        &mut self,
        node_id: &NodeId,
        style: NodeStyle,
    ) -> Result<(), EditorError> {
        self.apply(&[Op::SetNodeStyle { node_id: node_id.clone(), style }]).map(drop)
    }

    /// Removes the node and every edge touching it.
    pub fn delete_node(&mut self, node_id: &NodeId) -> Result<(), EditorError> {
        self.apply(&[Op::RemoveNode { node_id: node_id.clone() }]).map(drop)
    }

    pub fn create_edge(
        &mut self,
        kind: EdgeKind,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<EdgeId, EditorError> {
        let edge_id = self.scene.allocate_edge_id();
        self.apply(&[Op::AddEdge {
            edge_id: edge_id.clone(),
            kind,
            source: source.clone(),
            target: target.clone(),
        }])?;
        debug!("editor: created {kind} edge {edge_id} ({source} -> {target})");
        Ok(edge_id)
    }

    pub fn delete_edge(&mut self, edge_id: &EdgeId) -> Result<(), EditorError> {
        self.apply(&[Op::RemoveEdge { edge_id: edge_id.clone() }]).map(drop)
    }

    pub fn set_edge_label(
        &mut self,
        edge_id: &EdgeId,
        text: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.apply(&[Op::SetEdgeLabel { edge_id: edge_id.clone(), text: text.into() }]).map(drop)
    }

    /// Drags the floating label; `None` snaps it back to the line midpoint.
    pub fn move_edge_label(
        &mut self,
        edge_id: &EdgeId,
        offset: Option<Point>,
    ) -> Result<(), EditorError> {
        self.apply(&[Op::SetLabelOffset { edge_id: edge_id.clone(), offset }]).map(drop)
    }

    pub fn set_edge_style(
        &mut self,
        edge_id: &EdgeId,
        style: EdgeStyle,
    ) -> Result<(), EditorError> {
        self.apply(&[Op::SetEdgeStyle { edge_id: edge_id.clone(), style }]).map(drop)
    }

    /// Deletes the selected node or edge. Returns `false` when nothing is selected.
    pub fn delete_selection(&mut self) -> Result<bool, EditorError> {
        let Some(selected) = self.selection.clone() else {
            return Ok(false);
        };
        match selected {
            SceneRef::Node(node_id) => self.delete_node(&node_id)?,
            SceneRef::Edge(edge_id) => self.delete_edge(&edge_id)?,
        }
        Ok(true)
    }

    /// Takes the pending history capture if it is due. Returns whether one was taken.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        if !self.history.poll(now) {
            return false;
        }
        self.history.capture(serialize(&self.scene), now)
    }

    /// Takes the pending history capture right away, ignoring debounce and throttle.
    pub fn flush_history(&mut self) -> bool {
        if !self.history.has_pending() {
            return false;
        }
        let now = self.clock.now();
        self.history.capture(serialize(&self.scene), now)
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        self.flush_history();
        match self.history.undo().cloned() {
            Ok(document) => {
                self.restore(&document);
                self.emit(SceneEvent::status("undo"));
                Ok(())
            }
            Err(err) => {
                self.emit(SceneEvent::status(err.to_string()));
                Err(err.into())
            }
        }
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        self.flush_history();
        match self.history.redo().cloned() {
            Ok(document) => {
                self.restore(&document);
                self.emit(SceneEvent::status("redo"));
                Ok(())
            }
            Err(err) => {
                self.emit(SceneEvent::status(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Replaces the scene with a history entry without recording the replacement itself.
    fn restore(&mut self, document: &Document) {
        self.history.set_suppressed(true);
        self.history.cancel_pending();

        let restored = deserialize(document);
        let mut scene = restored.scene;
        scene.ids_mut().absorb(self.scene.ids());
        self.scene = scene;
        debug!(
            "editor: restored {} nodes and {} edges",
            self.scene.nodes().len(),
            self.scene.edges().len()
        );

        self.track_connection(|protocol| protocol.cancel(CancelReason::SourceRemoved));
        let selection_gone = match &self.selection {
            Some(SceneRef::Node(node_id)) => self.scene.node(node_id).is_none(),
            Some(SceneRef::Edge(edge_id)) => self.scene.edge(edge_id).is_none(),
            None => false,
        };
        if selection_gone {
            self.select(None);
        }

        self.history.set_suppressed(false);
    }

    pub fn document(&self) -> Document {
        serialize(&self.scene)
    }

    /// Replaces the scene with `document` and starts a fresh history from it.
    pub fn load_document(&mut self, document: &Document) -> Vec<DeserializeWarning> {
        let restored = deserialize(document);
        self.scene = restored.scene;
        self.history = History::new(*self.history.policy());
        self.track_connection(|protocol| protocol.cancel(CancelReason::SourceRemoved));
        self.select(None);
        self.capture_baseline();

        let message = match restored.warnings.len() {
            0 => format!("loaded {} nodes", self.scene.nodes().len()),
            dropped => format!(
                "loaded {} nodes, dropped {dropped} records",
                self.scene.nodes().len()
            ),
        };
        self.emit(SceneEvent::status(message));
        restored.warnings
    }

    pub fn suggestion_request(&self, use_case: &NodeId) -> Result<SuggestionRequest, EditorError> {
        Ok(suggestion_request(&self.scene, use_case)?)
    }

    /// Asks `suggester` for misuse cases threatening `use_case`.
    pub fn fetch_suggestions(
        &mut self,
        use_case: &NodeId,
        suggester: &impl MisuseCaseSuggester,
    ) -> Result<Vec<MisuseSuggestion>, EditorError> {
        let request = self.suggestion_request(use_case)?;
        match suggester.suggest(&request) {
            Ok(suggestions) => Ok(suggestions),
            Err(err) => {
                self.emit(SceneEvent::status(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Adds confirmed suggestions to the scene as one batch and one history step.
    pub fn materialize_suggestions(
        &mut self,
        use_case: &NodeId,
        suggestions: &[MisuseSuggestion],
    ) -> Result<ApplyResult, EditorError> {
        let ops = plan_materialization(&mut self.scene, use_case, suggestions)?;
        self.flush_history();
        let result = self.apply(&ops)?;
        self.flush_history();
        self.emit(SceneEvent::status(format!("added {} misuse cases", suggestions.len())));
        Ok(result)
    }
}
