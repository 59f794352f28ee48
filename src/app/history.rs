use crate::core::{Element, ElementId, ElementStore, FlipSide, Journal, WallState};

/// Art einer abgeschlossenen Bearbeitung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    AddWall,
    ResizeWall,
    MoveWall,
    DeleteWall,
    AddRoof,
}

/// Ein Undo-Eintrag: alle Daten, um eine Geste samt Kaskaden umzukehren.
///
/// Reine Daten, keine Closures. `undo` spielt das Journal invertiert in
/// umgekehrter Reihenfolge ab (Flips werden dabei erneut ausgeführt), `redo`
/// spielt es vorwärts ab.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyCommand {
    pub kind: CommandKind,
    /// Die bearbeitete Wand
    pub wall_id: ElementId,
    /// Zustand vor der Geste (`None` bei neu gebauten Wänden)
    pub before: Option<WallState>,
    /// Zustand nach der Geste (`None` bei gelöschten Wänden)
    pub after: Option<WallState>,
    /// Nachbarwände, deren Joints sich als Nebeneffekt geändert haben
    pub neighbor_ids: Vec<ElementId>,
    /// Zuletzt angewendeter Flip
    pub flip: FlipSide,
    /// Automatisch entfernte Elemente (Dach und getragene Elemente)
    pub removed_elements: Vec<Element>,
    /// Automatisch erzeugte Elemente
    pub inserted_elements: Vec<Element>,
    /// Geordnete primitive Mutationen
    pub journal: Journal,
}

impl TopologyCommand {
    /// Leitet die Zusammenfassung aus dem Journal einer abgeschlossenen Geste ab.
    pub fn from_journal(
        kind: CommandKind,
        wall_id: ElementId,
        before: Option<WallState>,
        after: Option<WallState>,
        journal: Journal,
    ) -> Self {
        let neighbor_ids = journal
            .joint_changed_walls()
            .into_iter()
            .filter(|id| *id != wall_id)
            .collect();
        Self {
            kind,
            wall_id,
            before,
            after,
            neighbor_ids,
            flip: journal.flip_side(),
            removed_elements: journal.removed_elements(),
            inserted_elements: journal.inserted_elements(),
            journal,
        }
    }

    pub fn undo(&self, store: &mut ElementStore) {
        self.journal.revert(store);
    }

    pub fn redo(&self, store: &mut ElementStore) {
        self.journal.apply(store);
    }
}

/// Undo/Redo-Manager über expliziten Topologie-Commands.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo_stack: Vec<TopologyCommand>,
    redo_stack: Vec<TopologyCommand>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Legt einen abgeschlossenen Command ab und verwirft den Redo-Stack.
    ///
    /// Bei Tiefe 0 wird nichts aufgezeichnet; beide Stacks bleiben leer.
    pub fn push(&mut self, command: TopologyCommand) {
        self.redo_stack.clear();
        if self.max_depth == 0 {
            self.undo_stack.clear();
            return;
        }
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Zuletzt abgelegter Command.
    pub fn last(&self) -> Option<&TopologyCommand> {
        self.undo_stack.last()
    }

    /// Macht den letzten Command rückgängig. Gibt dessen Art zurück.
    pub fn undo(&mut self, store: &mut ElementStore) -> Option<CommandKind> {
        let command = self.undo_stack.pop()?;
        command.undo(store);
        let kind = command.kind;
        if !self.redo_stack.is_empty() && self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(command);
        Some(kind)
    }

    /// Stellt den zuletzt rückgängig gemachten Command wieder her.
    pub fn redo(&mut self, store: &mut ElementStore) -> Option<CommandKind> {
        let command = self.redo_stack.pop()?;
        command.redo(store);
        let kind = command.kind;
        if !self.undo_stack.is_empty() && self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
        Some(kind)
    }

    /// Ändert die maximale Tiefe; überzählige älteste Einträge entfallen.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        if self.undo_stack.len() > max_depth {
            let excess = self.undo_stack.len() - max_depth;
            self.undo_stack.drain(..excess);
        }
        if self.redo_stack.len() > max_depth {
            let excess = self.redo_stack.len() - max_depth;
            self.redo_stack.drain(..excess);
        }
    }
}
