mod step_lenses;
