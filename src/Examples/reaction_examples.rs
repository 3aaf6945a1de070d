pub fn reaction_examples(task: usize) {
    //
    match task {
        0 => {
            // UNIT CHANGE OF A + B <=> C + D
            use crate::Reactions::coefficients::{BalancedReactionCoefficients, SpeciesValues};
            use crate::Reactions::convergence_solver::ReactionConvergenceSolver;
            let solver = ReactionConvergenceSolver::new();
            let coefficients = BalancedReactionCoefficients::default();
            let initial = SpeciesValues::reactants(0.5, 0.5);
            match solver.solve(&coefficients, &initial, 1.0, true) {
                Some(result) => println!(
                    "x = {:.5}, Q = {:.5} after {} iterations",
                    result.unit_change, result.quotient, result.iterations
                ),
                None => println!("no solution"),
            }
        }
        1 => {
            // FORWARD REACTION AND THE REVERSE ONE AFTER ADDING PRODUCTS
            use crate::Reactions::balanced_equations::BalancedReactionEquations;
            use crate::Reactions::coefficients::BalancedReactionCoefficients;
            use crate::Reactions::convergence_solver::ReactionConvergenceSolver;
            let solver = ReactionConvergenceSolver::new();
            let coefficients = BalancedReactionCoefficients::new(2, 1, 2, 0).unwrap();
            let forward =
                BalancedReactionEquations::forward(coefficients, 5.0, 0.4, 0.3, 0.0, 10.0, &solver).unwrap();
            let times: Vec<f64> = (0..=10).map(|i| i as f64).collect();
            forward.print_concentration_table(&times);

            let mut mixture = forward.converged_concentrations();
            mixture.product_c += 0.2;
            let reverse = BalancedReactionEquations::reverse(&forward, mixture, 15.0, 25.0, &solver).unwrap();
            let times: Vec<f64> = (0..=25).step_by(2).map(|i| i as f64).collect();
            reverse.print_concentration_table(&times);
        }
        2 => {
            // REACTION GIVEN AS A STRING
            use crate::Reactions::balanced_equations::BalancedReactionEquations;
            use crate::Reactions::coefficients::parse_reaction_equation;
            use crate::Reactions::convergence_solver::ReactionConvergenceSolver;
            let parsed = parse_reaction_equation("N2O4 <=> 2NO2").unwrap();
            println!("{}", parsed.coefficients.to_equation_string(&parsed.names));
            let solver = ReactionConvergenceSolver::new();
            let forward =
                BalancedReactionEquations::forward(parsed.coefficients, 0.2, 0.8, 0.0, 0.0, 20.0, &solver).unwrap();
            let times: Vec<f64> = (0..=20).step_by(4).map(|i| i as f64).collect();
            forward.print_concentration_table(&times);
        }
        3 => {
            // MOLECULES ON THE GRID
            use crate::Reactions::coefficients::{BalancedReactionCoefficients, SpeciesRole};
            use crate::Reactions::convergence_solver::ReactionConvergenceSolver;
            use crate::Reactions::reaction_components::ReactionComponents;
            use crate::settings::GridSettings;
            use rand::SeedableRng;
            use rand::rngs::StdRng;
            let mut rng = StdRng::seed_from_u64(42);
            let solver = ReactionConvergenceSolver::new();
            let components = ReactionComponents::new(BalancedReactionCoefficients::default(), 1.0, GridSettings::default())
                .adding_molecules(SpeciesRole::ReactantA, 30, &mut rng)
                .adding_molecules(SpeciesRole::ReactantB, 30, &mut rng)
                .running_forward(0.0, 10.0, &solver, &mut rng)
                .unwrap()
                .running_reverse(10, 10, 15.0, 25.0, &solver, &mut rng)
                .unwrap();
            for t in [0.0, 5.0, 10.0, 15.0, 20.0, 25.0] {
                let counts: Vec<usize> = SpeciesRole::ALL
                    .iter()
                    .map(|role| components.visible_coordinates(*role, t).len())
                    .collect();
                println!("t = {:>4}: A B C D = {:?}", t, counts);
            }
            println!("snapshots in history: {}", components.history_len());
        }
        4 => {
            // BALANCING GRID POOLS
            use crate::Grid::grid_coordinate::GridCoordinate;
            use crate::Grid::grid_element_balancer::{GridElementBalancer, GridElementToBalance};
            use rand::SeedableRng;
            use rand::rngs::StdRng;
            let mut rng = StdRng::seed_from_u64(7);
            let cells = GridCoordinate::grid(10, 10);
            let balancer = GridElementBalancer::new(
                GridElementToBalance::new(vec![], 5),
                GridElementToBalance::new(vec![], 3),
                GridElementToBalance::new(cells[..8].to_vec(), 0),
                GridElementToBalance::new(vec![], 0),
                10,
                10,
            )
            .unwrap();
            let balanced = balancer.balance(&mut rng);
            println!(
                "transferred {}, fresh {}, A {:?}, B {:?}",
                balanced.transferred,
                balanced.fresh,
                balanced.increasing_a.final_coords(),
                balanced.increasing_b.final_coords()
            );
        }
        5 => {
            // SETTINGS
            use crate::settings::EngineSettings;
            let settings = EngineSettings::from_json_str(r#"{"grid": {"rows": 15}, "log_level": "debug"}"#).unwrap();
            println!("{}", settings.to_json_string().unwrap());
        }
        _ => {
            println!("no such example: {}", task);
        }
    }
}
