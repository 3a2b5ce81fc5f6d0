//! Validates rule semantics through rows built from specifications

use ravengen::generator::{RandomSelector, RowGenerator};
use ravengen::panel::Panel;
use ravengen::panel::sampler::uniform_triangles;
use ravengen::rules::{RuleSpec, build_rule};
use ravengen::schema::Attribute;

fn build_row(spec: &RuleSpec, seeds: &[Panel], seed: u64) -> [Panel; 3] {
    let rule = match build_rule(spec) {
        Ok(rule) => rule,
        Err(err) => unreachable!("specification failed to build: {err}"),
    };
    let mut generator = RowGenerator::new(vec![rule]);
    let mut selector = RandomSelector::new(seed);
    match generator.generate(seeds, &mut selector) {
        Ok(row) => row,
        Err(err) => unreachable!("row generation failed: {err}"),
    }
}

#[test]
fn test_progression_steps_size_across_columns() {
    let row = build_row(&RuleSpec::progression("size", 1), &[uniform_triangles(3)], 1);

    for (index, panel) in row.iter().enumerate() {
        assert_eq!(panel.total_entities(), 3);
        for (r, c) in panel.filled_positions() {
            assert_eq!(panel.get_attr(r, c, Attribute::Size), 3 + index as i32);
        }
    }
}

#[test]
fn test_number_progression_changes_the_entity_count() {
    let row = build_row(&RuleSpec::progression("number", 1), &[uniform_triangles(2)], 8);

    let counts: Vec<usize> = row.iter().map(Panel::total_entities).collect();
    assert_eq!(counts, vec![2, 3, 4]);
}

#[test]
fn test_rotation_rule_turns_the_panel_layout() {
    let row = build_row(&RuleSpec::rotation(1, true), &[uniform_triangles(1)], 3);

    let positions: Vec<Vec<(usize, usize)>> =
        row.iter().map(Panel::filled_positions).collect();
    assert_eq!(
        positions,
        vec![vec![(0, 0)], vec![(0, 2)], vec![(2, 2)]]
    );
}

#[test]
fn test_shift_rule_rolls_entities_sideways() {
    let row = build_row(&RuleSpec::shift("right", 1), &[uniform_triangles(1)], 3);

    let positions: Vec<Vec<(usize, usize)>> =
        row.iter().map(Panel::filled_positions).collect();
    assert_eq!(
        positions,
        vec![vec![(0, 0)], vec![(0, 1)], vec![(0, 2)]]
    );
}

#[test]
fn test_arithmetic_rule_combines_the_first_two_columns() {
    let mut first = Panel::new();
    let mut second = Panel::new();
    for (panel, col) in [(&mut first, 0), (&mut second, 1)] {
        assert!(panel.set_entity(1, 1, [1, 2, 2, 0, 3]).is_ok());
        assert!(panel.set_entity(0, col, [1, 1, 4, 0, 1]).is_ok());
    }

    let row = build_row(
        &RuleSpec::arithmetic("size", "add"),
        &[first.clone(), second.clone()],
        6,
    );

    let (Some(left), Some(center), Some(result)) = (row.first(), row.get(1), row.get(2)) else {
        unreachable!("rows hold three panels");
    };
    assert_eq!(left, &first);
    assert_eq!(center, &second);
    // Only the shared cell survives, with the sum 2 + 2 = 4
    assert_eq!(result.filled_positions(), vec![(1, 1)]);
    assert_eq!(result.get_attr(1, 1, Attribute::Size), 4);
}

#[test]
fn test_distribute_three_paints_three_distinct_column_values() {
    let row = build_row(&RuleSpec::distribute_three("color"), &[uniform_triangles(4)], 12);

    let mut values = Vec::new();
    for panel in &row {
        let positions = panel.filled_positions();
        let (r, c) = positions.first().copied().unwrap_or((0, 0));
        let value = panel.get_attr(r, c, Attribute::Color);
        for (row_index, col_index) in positions {
            assert_eq!(panel.get_attr(row_index, col_index, Attribute::Color), value);
        }
        values.push(value);
    }
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), 3);
}

#[test]
fn test_composite_rule_applies_members_in_sequence() {
    let spec = RuleSpec::composite(vec![
        RuleSpec::progression("size", 1),
        RuleSpec::shift("right", 1),
    ]);
    let row = build_row(&spec, &[uniform_triangles(1)], 4);

    let expectations = [((0usize, 0usize), 3), ((0, 1), 4), ((0, 2), 5)];
    for (panel, ((r, c), size)) in row.iter().zip(expectations) {
        assert_eq!(panel.filled_positions(), vec![(r, c)]);
        assert_eq!(panel.get_attr(r, c, Attribute::Size), size);
    }
}

#[test]
fn test_constant_rule_repeats_the_seed() {
    let seed_panel = uniform_triangles(5);
    let row = build_row(&RuleSpec::constant(), &[seed_panel.clone()], 2);

    for panel in &row {
        assert_eq!(panel, &seed_panel);
    }
}
