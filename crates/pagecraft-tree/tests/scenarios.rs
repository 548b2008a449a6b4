//! End-to-end scenarios over the block tree.

use std::collections::HashSet;

use pagecraft_tree::{Block, BlockKind, BlockPath, BlockTree, Breakpoint, TreeError, resolve_value_at_breakpoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

fn tree(value: serde_json::Value) -> BlockTree {
    serde_json::from_value(value).unwrap()
}

fn all_ids(tree: &BlockTree) -> Vec<String> {
    tree.iter().map(|(_, b)| b.id.to_string()).collect()
}

fn subtree_ids(block: &Block) -> HashSet<String> {
    let mut ids = HashSet::new();
    let mut stack = vec![block];
    while let Some(b) = stack.pop() {
        ids.insert(b.id.to_string());
        stack.extend(b.blocks.iter());
    }
    ids
}

/// Random tree with unique generated ids, up to `max_depth` levels.
fn random_tree(rng: &mut StdRng, max_depth: usize) -> BlockTree {
    fn random_block(rng: &mut StdRng, depth: usize, max_depth: usize) -> Block {
        if depth + 1 >= max_depth || rng.gen_bool(0.4) {
            return Block::new(BlockKind::Text).with_prop("text", "leaf");
        }
        let mut block = Block::new(BlockKind::Container);
        for _ in 0..rng.gen_range(0..4) {
            block.blocks.push(random_block(rng, depth + 1, max_depth));
        }
        block
    }

    let roots = (0..rng.gen_range(1..5)).map(|_| random_block(rng, 0, max_depth)).collect();
    BlockTree::from_blocks(roots)
}

#[test]
fn scenario_append_into_container() {
    let mut t = tree(json!([{"id": "a", "type": "container", "allowNesting": true, "blocks": []}]));

    let b: Block = serde_json::from_value(json!({"id": "b", "type": "text"})).unwrap();
    t.append_child("a", b.clone()).unwrap();

    assert_eq!(t.blocks()[0].blocks, vec![b.clone()]);
    assert_eq!(t.find_by_id("b"), Some(&b));
}

#[test]
fn scenario_duplicate_container_with_child() {
    let mut t = tree(json!([{"id": "a", "type": "container", "allowNesting": true, "blocks": []}]));
    t.append_child("a", Block::new(BlockKind::Text).with_id("b")).unwrap();

    let copy = t.duplicate_block("a").unwrap().clone();

    assert_ne!(copy.id, "a");
    assert_eq!(t.len(), 2);
    assert_eq!(t.blocks()[1], copy);
    assert_eq!(copy.blocks.len(), 1);
    assert_ne!(copy.blocks[0].id, "b");

    // original untouched
    assert_eq!(t.blocks()[0].id, "a");
    assert_eq!(t.blocks()[0].blocks[0].id, "b");
}

#[test]
fn scenario_build_page_by_path() {
    let mut t = BlockTree::new();
    let section = |id: &str| Block::new(BlockKind::Section).with_id(id);

    t.insert_at(&"0".parse().unwrap(), section("intro")).unwrap();
    t.insert_at(&"1".parse().unwrap(), section("outline")).unwrap();
    t.insert_at(&"0-0".parse().unwrap(), Block::new(BlockKind::Heading).with_id("h")).unwrap();
    t.insert_at(&"0-1".parse().unwrap(), Block::new(BlockKind::Text).with_id("p")).unwrap();
    t.insert_at(&"1-0".parse().unwrap(), Block::new(BlockKind::List).with_id("modules")).unwrap();

    assert_eq!(all_ids(&t), vec!["intro", "h", "p", "outline", "modules"]);

    // a list block does not nest
    let err = t
        .insert_at(&"1-0-0".parse().unwrap(), Block::new(BlockKind::Text))
        .unwrap_err();
    assert!(matches!(err, TreeError::NestingNotAllowed(ref id) if id == "modules"));
}

#[test]
fn scenario_save_and_reload() {
    let mut t = BlockTree::new();
    t.push(
        Block::new(BlockKind::Container)
            .with_id("hero")
            .with_style("spacing", "padding", "24px"),
    );
    t.append_child("hero", Block::new(BlockKind::Button).with_id("cta").with_prop("label", "Enroll"))
        .unwrap();
    t.set_style("hero", "spacing", "padding", "8px", Breakpoint::Xs).unwrap();

    let saved = t.to_json().unwrap();
    let reloaded = BlockTree::from_json(&saved).unwrap();
    assert_eq!(reloaded, t);

    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(value[0]["style"]["spacing"]["padding"], json!({"xs": "8px", "md": "24px"}));
    assert_eq!(value[0]["allowNesting"], json!(true));
    assert_eq!(value[0]["blocks"][0]["label"], json!("Enroll"));
}

#[test]
fn property_duplicate_keeps_ids_unique() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut t = random_tree(&mut rng, 5);
        t.validate_ids().unwrap();

        let candidates = all_ids(&t);
        let target = &candidates[rng.gen_range(0..candidates.len())];
        let original_ids = subtree_ids(t.find_by_id(target).unwrap());
        let before = t.block_count();

        let copy = t.duplicate_block(target).unwrap().clone();
        let copy_ids = subtree_ids(&copy);

        assert!(original_ids.is_disjoint(&copy_ids));
        assert_eq!(original_ids.len(), copy_ids.len());
        assert_eq!(t.block_count(), before + copy_ids.len());
        t.validate_ids().unwrap();
    }
}

#[test]
fn property_assign_new_ids_unique() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let t = random_tree(&mut rng, 6);
        let mut blocks = t.clone().into_blocks();
        for block in &mut blocks {
            block.assign_new_ids();
        }
        let renamed = BlockTree::from_blocks(blocks);
        renamed.validate_ids().unwrap();

        let old: HashSet<String> = all_ids(&t).into_iter().collect();
        let new: HashSet<String> = all_ids(&renamed).into_iter().collect();
        assert!(old.is_disjoint(&new));
        assert_eq!(old.len(), new.len());
    }
}

#[test]
fn property_path_matches_manual_indexing() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let t = random_tree(&mut rng, 5);
        for (_, block) in t.iter() {
            let path = t.path_of(block.id.as_str()).unwrap();

            let (first, rest) = path.indices().split_first().unwrap();
            let mut manual = &t.blocks()[*first];
            for &i in rest {
                manual = &manual.blocks[i];
            }
            assert_eq!(manual.id, block.id);
            assert_eq!(t.get_block_by_path(&path.to_string()), Some(manual));
        }
    }
}

#[test]
fn property_failed_delete_is_noop() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let mut t = random_tree(&mut rng, 4);
        let before = t.clone();
        assert!(t.delete_block("not-in-tree").is_err());
        assert_eq!(t, before);
    }
}

#[test]
fn property_nesting_guard() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..20 {
        let mut t = random_tree(&mut rng, 5);
        let leaves: Vec<BlockPath> = t
            .iter()
            .filter(|(_, b)| !b.allow_nesting)
            .map(|(_, b)| t.path_of(b.id.as_str()).unwrap())
            .collect();

        for leaf in leaves {
            let before = t.clone();
            let err = t.insert_at(&leaf.child(0), Block::new(BlockKind::Text)).unwrap_err();
            assert!(matches!(err, TreeError::NestingNotAllowed(_)));
            assert_eq!(t, before);
        }
    }
}

#[test]
fn breakpoint_resolution_examples() {
    let up = serde_json::from_value(json!({"md": "10px", "xs": ""})).unwrap();
    assert_eq!(resolve_value_at_breakpoint(&up, Breakpoint::Xs), "10px");

    let down = serde_json::from_value(json!({"xs": "5px", "md": ""})).unwrap();
    assert_eq!(resolve_value_at_breakpoint(&down, Breakpoint::Md), "5px");
}
