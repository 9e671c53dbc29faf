//! The parsed tree and the navigation the applier needs on it.

use crate::yamlpath::Step;

/// The mutable document tree patch operations apply to.
pub type Node = serde_yaml::Value;

/// Parses a YAML text into a tree, keeping the document's key order.
pub fn parse(text: &str) -> Result<Node, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

/// Serializes a tree back into 2-space indented block YAML.
pub fn serialize(node: &Node) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(node)
}

/// Returns the node at `location`, if the steps still resolve.
pub fn lookup<'a>(node: &'a Node, location: &[Step]) -> Option<&'a Node> {
    let mut current = node;
    for step in location {
        current = match (step, current) {
            (Step::Key(key), Node::Mapping(map)) => map
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, child)| child)?,
            (Step::Index(index), Node::Sequence(seq)) => seq.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable variant of [`lookup`].
pub fn lookup_mut<'a>(node: &'a mut Node, location: &[Step]) -> Option<&'a mut Node> {
    let mut current = node;
    for step in location {
        current = match (step, current) {
            (Step::Key(key), Node::Mapping(map)) => map
                .iter_mut()
                .find(|(k, _)| *k == key)
                .map(|(_, child)| child)?,
            (Step::Index(index), Node::Sequence(seq)) => seq.get_mut(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Replaces the subtree rooted at `node` with `new`, wholesale. Every
/// replacement in the engine funnels through here.
pub fn replace_subtree(node: &mut Node, new: Node) {
    *node = new;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let root = parse("b: 2\na: 1\n").unwrap();
        // key order survives the round trip
        assert_eq!(serialize(&root).unwrap(), "b: 2\na: 1\n");
    }

    #[test]
    fn test_lookup_steps() {
        let root = parse("spec:\n  items:\n  - name: first\n  - name: second\n").unwrap();
        let location = vec![
            Step::Key("spec".into()),
            Step::Key("items".into()),
            Step::Index(1),
            Step::Key("name".into()),
        ];
        let node = lookup(&root, &location).unwrap();
        assert_eq!(node, &Node::String("second".into()));

        let missing = vec![Step::Key("spec".into()), Step::Key("absent".into())];
        assert!(lookup(&root, &missing).is_none());
    }

    #[test]
    fn test_lookup_integer_key() {
        let root = parse("80: http\n").unwrap();
        let node = lookup(&root, &[Step::Key(80.into())]).unwrap();
        assert_eq!(node, &Node::String("http".into()));
        // the string "80" is a different key
        assert!(lookup(&root, &[Step::Key("80".into())]).is_none());
    }

    #[test]
    fn test_lookup_distinguishes_collided_keys() {
        let root = parse("2: int\n\"2\": str\n").unwrap();
        assert_eq!(
            lookup(&root, &[Step::Key(2.into())]),
            Some(&Node::String("int".into()))
        );
        assert_eq!(
            lookup(&root, &[Step::Key("2".into())]),
            Some(&Node::String("str".into()))
        );
    }

    #[test]
    fn test_lookup_kind_mismatch() {
        let root = parse("spec: scalar\n").unwrap();
        assert!(lookup(&root, &[Step::Index(0)]).is_none());
        assert!(lookup(&root, &[Step::Key("spec".into()), Step::Key("x".into())]).is_none());
    }

    #[test]
    fn test_replace_subtree() {
        let mut root = parse("spec:\n  replicas: 2\n").unwrap();
        let location = vec![Step::Key("spec".into()), Step::Key("replicas".into())];
        let node = lookup_mut(&mut root, &location).unwrap();
        replace_subtree(node, Node::Number(3.into()));
        assert_eq!(serialize(&root).unwrap(), "spec:\n  replicas: 3\n");
    }
}
