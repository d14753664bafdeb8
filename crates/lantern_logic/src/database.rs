//! The append-only fact database.

use lantern_foundation::{Error, Result, Term};

/// A stored clause: a conclusion plus zero or more hypotheses.
///
/// A fact with no hypotheses is unconditionally true; otherwise the head
/// holds whenever every hypothesis holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Fact {
    /// The conclusion.
    pub head: Term,
    /// The hypotheses, all of which must be established.
    pub hypotheses: Vec<Term>,
}

impl Fact {
    /// Builds a fact from the body of a `(fact conclusion hypothesis...)`
    /// form: the first relation is the head, the rest are hypotheses.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is empty or any relation is not a
    /// non-empty proper list.
    pub fn from_relations(relations: &[Term]) -> Result<Self> {
        let Some((head, hypotheses)) = relations.split_first() else {
            return Err(Error::malformed("a fact needs a conclusion".to_string()));
        };
        for relation in relations {
            check_relation(relation)?;
        }
        Ok(Self {
            head: head.clone(),
            hypotheses: hypotheses.to_vec(),
        })
    }
}

/// Requires a relation to be a non-empty proper list.
fn check_relation(relation: &Term) -> Result<()> {
    if relation.as_pair().is_some() && relation.is_proper_list() {
        Ok(())
    } else {
        Err(Error::malformed(format!("not a relation: {relation}")))
    }
}

/// An append-only store of facts in insertion order.
///
/// Resolution tries facts oldest-first, so adding a fact never changes the
/// order in which earlier solutions appear.
#[derive(Clone, Debug, Default)]
pub struct FactDatabase {
    facts: Vec<Fact>,
}

impl FactDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fact.
    pub fn add(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    /// Iterates facts in insertion order.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Returns the number of stored facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true when no facts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(names: &[&str]) -> Term {
        Term::list(names.iter().map(|name| Term::symbol(*name)).collect::<Vec<_>>())
    }

    #[test]
    fn simple_fact_has_no_hypotheses() {
        let fact = Fact::from_relations(&[relation(&["parent", "abe", "homer"])]).unwrap();
        assert_eq!(fact.head, relation(&["parent", "abe", "homer"]));
        assert!(fact.hypotheses.is_empty());
    }

    #[test]
    fn rule_splits_head_and_hypotheses() {
        let fact = Fact::from_relations(&[
            relation(&["grandparent", "?g", "?c"]),
            relation(&["parent", "?g", "?p"]),
            relation(&["parent", "?p", "?c"]),
        ])
        .unwrap();
        assert_eq!(fact.hypotheses.len(), 2);
    }

    #[test]
    fn relations_must_be_lists() {
        assert!(Fact::from_relations(&[]).is_err());
        assert!(Fact::from_relations(&[Term::symbol("bare")]).is_err());
        assert!(Fact::from_relations(&[Term::Empty]).is_err());
        assert!(Fact::from_relations(&[Term::cons(
            Term::symbol("a"),
            Term::symbol("b")
        )])
        .is_err());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut db = FactDatabase::new();
        assert!(db.is_empty());
        db.add(Fact::from_relations(&[relation(&["likes", "a", "x"])]).unwrap());
        db.add(Fact::from_relations(&[relation(&["likes", "b", "y"])]).unwrap());
        assert_eq!(db.len(), 2);
        let heads: Vec<_> = db.facts().map(|f| format!("{}", f.head)).collect();
        assert_eq!(heads, ["(likes a x)", "(likes b y)"]);
    }
}
