//! Text views of a maze: player view, full debug tree and rules.

use colored::Colorize;
use generational_arena::Index;
use termtree::Tree;

use crate::domain::{EventKind, EventTable, MazeNode, MazeTree};

/// Room label: its event letter once visited (or when revealed), `?` otherwise.
fn label(node: &MazeNode, reveal: bool) -> String {
    if node.visited || reveal {
        node.event.letter().to_string()
    } else {
        "?".to_string()
    }
}

fn bracketed(tree: &MazeTree, idx: Index) -> String {
    tree.node(idx)
        .map(|node| format!("[{}]", label(node, false)))
        .unwrap_or_default()
}

/// Local view: parent above, current room, and its two children.
pub fn player_view(tree: &MazeTree, current: Index) -> String {
    let mut out = String::new();
    let Some(node) = tree.node(current) else {
        return out;
    };

    out.push_str("\n=============================\n\n");
    if let Some(parent) = node.parent {
        out.push_str(&format!("          {}\n", bracketed(tree, parent)));
        out.push_str("           |\n");
    }
    out.push_str(&format!("          [{}] <- You are here\n", label(node, false)));
    out.push_str("         /   \\\n");

    match (node.left, node.right) {
        (Some(left), Some(right)) => {
            out.push_str(&format!(
                "      {}     {}\n",
                bracketed(tree, left),
                bracketed(tree, right)
            ));
        }
        (Some(left), None) => {
            out.push_str(&format!("      {}\n", bracketed(tree, left)));
        }
        (None, Some(right)) => {
            out.push_str(&format!("              {}\n", bracketed(tree, right)));
        }
        (None, None) => out.push('\n'),
    }

    if node.event != EventKind::Exit {
        out.push_str(&choices(tree, current));
    }
    out
}

/// Numbered list of the moves available from `current`.
pub fn choices(tree: &MazeTree, current: Index) -> String {
    let mut out = String::from("\nPossible moves:\n");
    let Some(node) = tree.node(current) else {
        return out;
    };
    let mut option = 1;
    if node.left.is_some() {
        out.push_str(&format!("{}. l <- go left\n", option));
        option += 1;
    }
    if node.right.is_some() {
        out.push_str(&format!("{}. r -> go right\n", option));
        option += 1;
    }
    if node.parent.is_some() {
        out.push_str(&format!("{}. u ^ back to parent\n", option));
        option += 1;
    }
    out.push_str(&format!("{}. q quit\n\n", option));
    out
}

/// Whole tree with markers around the player's position.
///
/// `reveal` shows every event letter, as the `generate` command does;
/// otherwise unvisited rooms stay hidden.
pub fn debug_view(tree: &MazeTree, current: Option<Index>, reveal: bool) -> String {
    let Some(root) = tree.root() else {
        return "Empty maze".to_string();
    };
    let current_node = current.and_then(|idx| tree.node(idx));

    let marker = |idx: Index| -> String {
        match current_node {
            Some(_) if Some(idx) == current => format!(" {}", "<- You are here".red()),
            Some(cur) if Some(idx) == cur.parent => format!(" {}", "<- Parent".green()),
            Some(cur) if Some(idx) == cur.left => format!(" {}", "<- Left".green()),
            Some(cur) if Some(idx) == cur.right => format!(" {}", "<- Right".green()),
            _ => String::new(),
        }
    };

    fn build(
        tree: &MazeTree,
        idx: Index,
        reveal: bool,
        marker: &dyn Fn(Index) -> String,
    ) -> Tree<String> {
        let Some(node) = tree.node(idx) else {
            return Tree::new("NULL".to_string());
        };
        let mut subtree = Tree::new(format!("{}{}", label(node, reveal), marker(idx)));
        if !node.is_leaf() {
            for child in [node.left, node.right] {
                let branch = match child {
                    Some(child) => build(tree, child, reveal, marker),
                    None => Tree::new("NULL".to_string()),
                };
                subtree.push(branch);
            }
        }
        subtree
    }

    build(tree, root, reveal, &marker).to_string()
}

/// Game rules, listing every event of the table.
pub fn rules(table: &EventTable) -> String {
    let mut out = String::new();
    out.push_str("Welcome to the tree maze!\n");
    out.push_str("Rules of the game:\n");
    out.push_str("1. You start at the entrance of the maze (E).\n");
    out.push_str("2. Your goal is to find the exit (S).\n");
    out.push_str("3. You can move left, right, or back up to the parent room.\n");
    out.push_str("4. Watch out for the events you may run into:\n");
    for entry in table.iter() {
        out.push_str(&format!("   - {} : {}\n", entry.letter(), entry.description));
    }
    out.push_str("5. Unexplored rooms are shown as a question mark (?).\n");
    out.push_str("6. Good luck and have fun!\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;

    fn small() -> (MazeTree, Index, Index, Index) {
        let mut tree = MazeTree::new();
        let root = tree.insert_root(EventKind::Entrance).unwrap();
        tree.node_mut(root).unwrap().visited = true;
        let left = tree.insert_child(root, Side::Left, EventKind::Fog).unwrap();
        let right = tree.insert_child(root, Side::Right, EventKind::Exit).unwrap();
        (tree, root, left, right)
    }

    #[test]
    fn test_player_view_hides_unvisited_rooms() {
        let (tree, root, _, _) = small();
        let view = player_view(&tree, root);
        assert!(view.contains("[E] <- You are here"));
        assert!(view.contains("[?]     [?]"));
        assert!(view.contains("1. l <- go left"));
        assert!(view.contains("2. r -> go right"));
        assert!(view.contains("3. q quit"));
    }

    #[test]
    fn test_player_view_at_exit_has_no_choices() {
        let (tree, _, _, right) = small();
        let view = player_view(&tree, right);
        assert!(view.contains("[E]"));
        assert!(!view.contains("Possible moves"));
    }

    #[test]
    fn test_debug_view_reveals_and_marks() {
        let (tree, root, left, _) = small();
        let revealed = debug_view(&tree, None, true);
        assert!(revealed.starts_with('E'));
        assert!(revealed.contains('B'));
        assert!(revealed.contains('S'));

        let hidden = debug_view(&tree, Some(left), false);
        assert!(hidden.contains("You are here"));
        assert!(hidden.contains("Parent"));
        assert!(!hidden.contains('B'));
        assert!(debug_view(&tree, Some(root), false).contains("Right"));
        assert_eq!(debug_view(&MazeTree::new(), None, true), "Empty maze");
    }

    #[test]
    fn test_debug_view_fills_missing_child_with_null() {
        let mut tree = MazeTree::new();
        let root = tree.insert_root(EventKind::Entrance).unwrap();
        let only = tree.insert_child(root, Side::Right, EventKind::Standard).unwrap();
        tree.insert_child(only, Side::Left, EventKind::Exit).unwrap();

        let view = debug_view(&tree, None, true);
        let lines: Vec<&str> = view.lines().collect();

        assert_eq!(view.matches("NULL").count(), 2);
        assert!(lines[1].ends_with("NULL"));
        assert!(lines[2].ends_with('X'));
    }

    #[test]
    fn test_rules_list_every_event() {
        let table = EventTable::default();
        let text = rules(&table);
        for entry in table.iter() {
            assert!(text.contains(&format!("- {} :", entry.letter())));
        }
    }
}
