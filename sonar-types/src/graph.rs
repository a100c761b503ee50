use std::collections::{BTreeSet, VecDeque};

use crate::{AnswerLetter, NextTarget, QuestionSlot, Survey};

/// A branch from one question's answer to its next target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub from: QuestionSlot,
    pub letter: AnswerLetter,
    pub target: NextTarget<'a>,
}

/// Read-only view of a survey as a directed graph over its question slots.
///
/// Nodes are the slots with question text, edges are their non-empty
/// answers. Cycles are allowed; slot 1 is the entry point.
#[derive(Debug, Clone, Copy)]
pub struct SurveyGraph<'a> {
    survey: &'a Survey,
}

impl<'a> SurveyGraph<'a> {
    pub fn new(survey: &'a Survey) -> Self {
        Self { survey }
    }

    /// Slots that appear as nodes.
    pub fn nodes(&self) -> impl Iterator<Item = QuestionSlot> + 'a {
        self.survey
            .questions()
            .filter(|(_, question)| !question.is_blank())
            .map(|(slot, _)| slot)
    }

    /// All branches, in slot then letter order.
    pub fn edges(&self) -> Vec<Edge<'a>> {
        let survey = self.survey;
        survey
            .questions()
            .filter(|(_, question)| !question.is_blank())
            .flat_map(|(slot, question)| {
                question.options().map(move |(letter, answer)| Edge {
                    from: slot,
                    letter,
                    target: answer.target(),
                })
            })
            .collect()
    }

    /// Slots reachable from question 1 by following answers.
    pub fn reachable_from_entry(&self) -> BTreeSet<QuestionSlot> {
        let mut seen = BTreeSet::new();
        if self.survey.question(QuestionSlot::ENTRY).is_blank() {
            return seen;
        }

        let edges = self.edges();
        let mut queue = VecDeque::from([QuestionSlot::ENTRY]);
        seen.insert(QuestionSlot::ENTRY);

        while let Some(slot) = queue.pop_front() {
            for edge in edges.iter().filter(|edge| edge.from == slot) {
                if let Some(target) = edge.target.slot()
                    && !self.survey.question(target).is_blank()
                    && seen.insert(target)
                {
                    queue.push_back(target);
                }
            }
        }

        seen
    }

    /// Nodes that can never be shown because no path from question 1 leads there.
    pub fn unreachable(&self) -> Vec<QuestionSlot> {
        let reachable = self.reachable_from_entry();
        self.nodes().filter(|slot| !reachable.contains(slot)).collect()
    }

    /// Nodes with no answers at all; the creative would stall on them.
    pub fn dead_ends(&self) -> Vec<QuestionSlot> {
        self.survey
            .questions()
            .filter(|(_, question)| !question.is_blank() && question.options().next().is_none())
            .map(|(slot, _)| slot)
            .collect()
    }
}
