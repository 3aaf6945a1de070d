#[cfg(test)]
mod tests {
    use crate::Grid::GridError;
    use crate::Grid::grid_coordinate::{GridCoordinate, coordinate_set, has_duplicates};
    use crate::Grid::grid_coordinate_list::GridCoordinateList;
    use crate::Grid::grid_element_balancer::{
        BalancedGridElement, GridElementBalancer, GridElementToBalance,
    };
    use crate::Grid::grid_element_setter::GridElementSetter;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn random_pools(rng: &mut StdRng, counts: &[usize]) -> Vec<Vec<GridCoordinate>> {
        let list = GridCoordinateList::new(10, 10);
        let mut taken = HashSet::new();
        let mut pools = Vec::new();
        for &count in counts {
            let pool = list.adding_random_elements(&[], count, &taken, rng);
            taken.extend(pool.iter().copied());
            pools.push(pool);
        }
        pools
    }

    fn all_final(elements: &[&BalancedGridElement]) -> Vec<GridCoordinate> {
        elements
            .iter()
            .flat_map(|e| e.final_coords().iter().copied())
            .collect()
    }

    #[test]
    fn test_transfer_split_follows_deltas() {
        let mut rng = StdRng::seed_from_u64(11);
        let pools = random_pools(&mut rng, &[0, 0, 8, 4]);
        let balancer = GridElementBalancer::new(
            GridElementToBalance::new(pools[0].clone(), 5),
            GridElementToBalance::new(pools[1].clone(), 3),
            GridElementToBalance::new(pools[2].clone(), 0),
            GridElementToBalance::new(pools[3].clone(), 4),
            10,
            10,
        )
        .unwrap();
        let balanced = balancer.balance(&mut rng);
        assert_eq!(balanced.transferred, 8);
        assert_eq!(balanced.fresh, 0);
        assert_eq!(balanced.increasing_a.coords.len(), 5);
        assert_eq!(balanced.increasing_b.coords.len(), 3);

        // every released coordinate of C went to A or B
        let released: HashSet<GridCoordinate> = pools[2].iter().copied().collect();
        let received = coordinate_set([
            balanced.increasing_a.coords.as_slice(),
            balanced.increasing_b.coords.as_slice(),
        ]);
        assert_eq!(released, received);

        assert_eq!(balanced.decreasing_c.initial_fraction, 1.0);
        assert_eq!(balanced.decreasing_c.final_fraction, 0.0);
        assert!(balanced.decreasing_c.final_coords().is_empty());
        assert_eq!(balanced.decreasing_d.final_coords(), pools[3].as_slice());
        assert_eq!(balanced.increasing_a.initial_fraction, 0.0);
        assert_eq!(balanced.increasing_a.final_fraction, 1.0);
    }

    #[test]
    fn test_moved_cells_follow_hiding_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let pools = random_pools(&mut rng, &[0, 0, 8, 4]);
        let c = &pools[2];
        let balancer = GridElementBalancer::new(
            GridElementToBalance::new(vec![], 5),
            GridElementToBalance::new(vec![], 3),
            GridElementToBalance::new(c.clone(), 0),
            GridElementToBalance::new(pools[3].clone(), 4),
            10,
            10,
        )
        .unwrap();
        let balanced = balancer.balance(&mut rng);
        // C hides c[7] first and c[0] last; A and B take them in turn, 5:3
        assert_eq!(balanced.increasing_a.coords, vec![c[7], c[5], c[4], c[2], c[0]]);
        assert_eq!(balanced.increasing_b.coords, vec![c[6], c[3], c[1]]);

        // C shrinks while A and B grow at the same pace: a handed over cell is drawn by its new
        // pool at most one rounding step before C hides it
        for i in 0..200 {
            let progress = (i as f64 + 0.37) / 200.0;
            let drawn_c = &c[..(8.0 - 8.0 * progress).round() as usize];
            let drawn_a = &balanced.increasing_a.coords[..(5.0 * progress).round() as usize];
            let drawn_b = &balanced.increasing_b.coords[..(3.0 * progress).round() as usize];
            let early = drawn_a
                .iter()
                .chain(drawn_b)
                .filter(|cell| drawn_c.contains(cell))
                .count();
            assert!(early <= 1, "progress {}: {} cells drawn twice", progress, early);
        }
    }

    #[test]
    fn test_moved_cells_wait_behind_fresh_ones() {
        let mut rng = StdRng::seed_from_u64(5);
        let pools = random_pools(&mut rng, &[2]);
        let c = &pools[0];
        let balancer = GridElementBalancer::new(
            GridElementToBalance::new(vec![], 4),
            GridElementToBalance::new(vec![], 0),
            GridElementToBalance::new(c.clone(), 0),
            GridElementToBalance::new(vec![], 0),
            10,
            10,
        )
        .unwrap();
        let balanced = balancer.balance(&mut rng);
        assert_eq!(balanced.transferred, 2);
        assert_eq!(balanced.fresh, 2);
        let a = &balanced.increasing_a.coords;
        // C hides its first cell at a quarter of its decrease, A draws its second cell at 3/8
        assert_eq!(a[1], c[1]);
        assert_eq!(a[3], c[0]);
        assert!(!c.contains(&a[0]) && !c.contains(&a[2]));
    }

    #[test]
    fn test_growth_beyond_transfer_uses_fresh_cells() {
        let mut rng = StdRng::seed_from_u64(2);
        let pools = random_pools(&mut rng, &[3, 2, 4, 2]);
        // A +6, B +4, C -4, D -2: 6 transferred, 4 fresh
        let balancer = GridElementBalancer::new(
            GridElementToBalance::new(pools[0].clone(), 9),
            GridElementToBalance::new(pools[1].clone(), 6),
            GridElementToBalance::new(pools[2].clone(), 0),
            GridElementToBalance::new(pools[3].clone(), 0),
            10,
            10,
        )
        .unwrap();
        let balanced = balancer.balance(&mut rng);
        assert_eq!(balanced.transferred, 6);
        assert_eq!(balanced.fresh, 4);
        assert_eq!(balanced.increasing_a.coords.len(), 9);
        assert_eq!(balanced.increasing_b.coords.len(), 6);
        assert_eq!(balanced.increasing_a.initial_coords(), pools[0].as_slice());
        assert_eq!(balanced.increasing_b.initial_coords(), pools[1].as_slice());

        let finals = all_final(&[
            &balanced.increasing_a,
            &balanced.increasing_b,
            &balanced.decreasing_c,
            &balanced.decreasing_d,
        ]);
        assert_eq!(finals.len(), 15);
        assert!(!has_duplicates(&finals));
        // fresh cells were not claimed by any pool before
        let before = coordinate_set(pools.iter().map(|p| p.as_slice()));
        let fresh: Vec<_> = finals.iter().filter(|c| !before.contains(c)).collect();
        assert_eq!(fresh.len(), 4);
    }

    #[test]
    fn test_extra_decrease_is_dropped() {
        let mut rng = StdRng::seed_from_u64(4);
        let pools = random_pools(&mut rng, &[1, 1, 10, 6]);
        // A +2, B +1, C -6, D -3
        let balancer = GridElementBalancer::new(
            GridElementToBalance::new(pools[0].clone(), 3),
            GridElementToBalance::new(pools[1].clone(), 2),
            GridElementToBalance::new(pools[2].clone(), 4),
            GridElementToBalance::new(pools[3].clone(), 3),
            10,
            10,
        )
        .unwrap();
        let balanced = balancer.balance(&mut rng);
        assert_eq!(balanced.transferred, 3);
        assert_eq!(balanced.fresh, 0);
        assert_eq!(balanced.decreasing_c.final_coords(), &pools[2][..4]);
        assert_eq!(balanced.decreasing_d.final_coords(), &pools[3][..3]);
        approx::assert_relative_eq!(balanced.decreasing_c.final_fraction, 0.4);
        approx::assert_relative_eq!(balanced.decreasing_d.final_fraction, 0.5);

        let finals = all_final(&[
            &balanced.increasing_a,
            &balanced.increasing_b,
            &balanced.decreasing_c,
            &balanced.decreasing_d,
        ]);
        assert_eq!(finals.len(), 3 + 2 + 4 + 3);
        assert!(!has_duplicates(&finals));
    }

    #[test]
    fn test_invalid_deltas_are_rejected() {
        let coords = vec![GridCoordinate::new(0, 0), GridCoordinate::new(0, 1)];
        let err = GridElementBalancer::new(
            GridElementToBalance::new(coords.clone(), 1),
            GridElementToBalance::new(vec![], 0),
            GridElementToBalance::new(vec![], 0),
            GridElementToBalance::new(vec![], 0),
            10,
            10,
        )
        .unwrap_err();
        assert_eq!(err, GridError::InvalidIncreasingDelta { delta: -1 });

        let err = GridElementBalancer::new(
            GridElementToBalance::new(vec![], 0),
            GridElementToBalance::new(vec![], 0),
            GridElementToBalance::new(vec![], 0),
            GridElementToBalance::new(coords, 5),
            10,
            10,
        )
        .unwrap_err();
        assert_eq!(err, GridError::InvalidDecreasingDelta { delta: 3 });
    }

    #[test]
    fn test_balancer_conservation_random() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            let counts: Vec<usize> = (0..4).map(|_| rng.random_range(0..15)).collect();
            let pools = random_pools(&mut rng, &counts);
            let final_a = counts[0] + rng.random_range(0..12);
            let final_b = counts[1] + rng.random_range(0..12);
            let final_c = rng.random_range(0..=counts[2]);
            let final_d = rng.random_range(0..=counts[3]);
            let balancer = GridElementBalancer::new(
                GridElementToBalance::new(pools[0].clone(), final_a),
                GridElementToBalance::new(pools[1].clone(), final_b),
                GridElementToBalance::new(pools[2].clone(), final_c),
                GridElementToBalance::new(pools[3].clone(), final_d),
                10,
                10,
            )
            .unwrap();
            let balanced = balancer.balance(&mut rng);
            let elements = [
                &balanced.increasing_a,
                &balanced.increasing_b,
                &balanced.decreasing_c,
                &balanced.decreasing_d,
            ];
            let finals = all_final(&elements);
            assert!(!has_duplicates(&finals));
            // at most 4 * 14 + 2 * 11 cells are ever needed, so the 10x10 grid never saturates
            assert_eq!(finals.len(), final_a + final_b + final_c + final_d);

            // every kept or transferred coordinate ends in exactly one pool
            let dropped = (counts[2] - final_c) + (counts[3] - final_d) - balanced.transferred;
            let before = coordinate_set(pools.iter().map(|p| p.as_slice()));
            let kept = finals.iter().filter(|c| before.contains(c)).count();
            assert_eq!(kept, before.len() - dropped);
        }
    }

    #[test]
    fn test_setter_keeps_pools_apart() {
        let mut rng = StdRng::seed_from_u64(8);
        let pools = random_pools(&mut rng, &[5, 12, 0, 7, 3]);
        let targets = [9, 4, 6, 7, 10];
        let elements: Vec<GridElementToBalance> = pools
            .iter()
            .zip(targets)
            .map(|(pool, target)| GridElementToBalance::new(pool.clone(), target))
            .collect();
        let setter = GridElementSetter::new(elements, 10, 10);
        let balanced = setter.balance(&mut rng);
        assert_eq!(balanced.len(), 5);
        for ((element, pool), target) in balanced.iter().zip(&pools).zip(targets) {
            assert_eq!(element.final_coords().len(), target);
            assert_eq!(element.initial_coords(), pool.as_slice());
        }
        // no cell is used by two pools after the transition, and new cells were free before it
        let finals: Vec<GridCoordinate> = balanced
            .iter()
            .flat_map(|e| e.final_coords().iter().copied())
            .collect();
        assert!(!has_duplicates(&finals));
        let before = coordinate_set(pools.iter().map(|p| p.as_slice()));
        for (element, pool) in balanced.iter().zip(&pools) {
            for c in &element.coords[pool.len()..] {
                assert!(!before.contains(c));
            }
        }
        let final_coordinates = setter.final_coordinates(&mut StdRng::seed_from_u64(8));
        assert_eq!(final_coordinates[1], pools[1][..4].to_vec());
    }

    #[test]
    fn test_setter_saturates() {
        let mut rng = StdRng::seed_from_u64(13);
        let elements = vec![
            GridElementToBalance::new(vec![], 60),
            GridElementToBalance::new(vec![], 60),
        ];
        let balanced = GridElementSetter::new(elements, 10, 10).balance(&mut rng);
        assert_eq!(balanced[0].coords.len(), 60);
        assert_eq!(balanced[1].coords.len(), 40);
        approx::assert_relative_eq!(balanced[1].initial_fraction, 0.0);
    }
}
