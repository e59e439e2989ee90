//! Property tests: the session invariants hold under arbitrary walks of
//! arbitrary (structurally valid) story graphs.

use proptest::prelude::*;

use case_model::{Choice, ChoiceTarget, Discoverable, DiscoverableId, Node, StoryGraph};
use investigation_core::{StoryGraphEngine, TraversalError};

#[derive(Debug, Clone)]
enum Command {
    Choose(usize),
    Back,
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => (0usize..8).prop_map(Command::Choose),
        1 => Just(Command::Back),
    ]
}

/// One choice blueprint: (target node index, is an ending, required node
/// indices whose discoverable gates the choice).
type ChoiceSeed = (usize, bool, Vec<usize>);

/// Generate a story graph of 2..=6 nodes. Node `i` is named `n<i>` and
/// reveals the single discoverable `find_<i>`; choice targets always index
/// into the node table, so the graph is structurally valid by construction.
fn story_strategy() -> impl Strategy<Value = (StoryGraph, Vec<Command>)> {
    (2usize..=6)
        .prop_flat_map(|n| {
            let choices = proptest::collection::vec(
                proptest::collection::vec(
                    (
                        0..n,
                        proptest::bool::weighted(0.1),
                        proptest::collection::vec(0..n, 0..3),
                    ),
                    0..4,
                ),
                n,
            );
            let commands = proptest::collection::vec(command_strategy(), 0..40);
            (Just(n), choices, commands)
        })
        .prop_map(|(n, seeds, commands): (usize, Vec<Vec<ChoiceSeed>>, Vec<Command>)| {
            let nodes: Vec<Node> = (0..n)
                .map(|i| {
                    let mut node = Node::new(format!("n{i}"), format!("Room {i}."))
                        .with_discoverable(Discoverable::new(
                            format!("find_{i}"),
                            format!("Finding {i}"),
                        ));
                    for (j, (target, ending, requirements)) in seeds[i].iter().enumerate() {
                        let target = if *ending {
                            ChoiceTarget::Ending
                        } else {
                            ChoiceTarget::node(format!("n{target}"))
                        };
                        node = node.with_choice(
                            Choice::new(format!("c{j}"), format!("Choice {j}"), target)
                                .with_requirements(
                                    requirements
                                        .iter()
                                        .map(|r| DiscoverableId::new(format!("find_{r}"))),
                                ),
                        );
                    }
                    node
                })
                .collect();

            let graph = StoryGraph::new(nodes, "n0").expect("generated graph is valid");
            (graph, commands)
        })
}

/// Pick the id of the k-th (mod len) choice on the current node, if any.
fn pick_choice(engine: &StoryGraphEngine, k: usize) -> Option<String> {
    engine.current_node().and_then(|node| {
        if node.choices.is_empty() {
            None
        } else {
            Some(node.choices[k % node.choices.len()].id.as_str().to_string())
        }
    })
}

proptest! {
    #[test]
    fn invariants_hold_under_any_walk((graph, commands) in story_strategy()) {
        let mut engine = StoryGraphEngine::new(graph);

        for command in commands {
            let discovered_before = engine.discovered().clone();
            let snapshot = engine.clone();

            match command {
                Command::Choose(k) => match pick_choice(&engine, k) {
                    Some(choice_id) => match engine.choose(&choice_id) {
                        Ok(_) => {}
                        Err(TraversalError::PrerequisiteNotMet { .. }) => {
                            // Gated choices leave the session untouched.
                            prop_assert_eq!(&engine, &snapshot);
                        }
                        Err(other) => {
                            prop_assert!(false, "unexpected choose error: {}", other);
                        }
                    },
                    None => {
                        // Dead end or ended: any choose fails and changes nothing.
                        prop_assert!(engine.choose("anything").is_err());
                        prop_assert_eq!(&engine, &snapshot);
                    }
                },
                Command::Back => match engine.back() {
                    Ok(_) => {}
                    Err(TraversalError::NoHistory) | Err(TraversalError::Ended) => {
                        prop_assert_eq!(&engine, &snapshot);
                    }
                    Err(other) => {
                        prop_assert!(false, "unexpected back error: {}", other);
                    }
                },
            }

            // Discovery is monotonic across every operation.
            prop_assert!(discovered_before.is_subset(engine.discovered()));

            // History is never empty; while active, its last entry is the
            // current node and that node resolves in the table.
            prop_assert!(!engine.history().is_empty());
            match engine.current_node() {
                Some(node) => {
                    prop_assert_eq!(engine.history().last(), Some(&node.id));
                    prop_assert!(engine.graph().contains(&node.id));
                }
                None => prop_assert!(engine.is_ended()),
            }
        }
    }

    #[test]
    fn reset_restores_constructed_state((graph, commands) in story_strategy()) {
        let mut engine = StoryGraphEngine::new(graph);
        let fresh = engine.clone();

        for command in commands {
            match command {
                Command::Choose(k) => {
                    if let Some(choice_id) = pick_choice(&engine, k) {
                        let _ = engine.choose(&choice_id);
                    }
                }
                Command::Back => {
                    let _ = engine.back();
                }
            }
        }

        engine.reset();
        prop_assert_eq!(engine, fresh);
    }
}
