use crate::demo::DemoState;

/// One engine tick: the demo's frame update, then a refresh of the cached
/// world matrices for whoever draws the frame.
pub fn update(state: &mut DemoState, time_delta: f32) -> anyhow::Result<()> {
    state.update(time_delta);
    state.scene.late_update();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CraneConfig;
    use crate::demo::DemoChoice;

    #[test]
    fn tick_leaves_world_matrices_clean() {
        let mut state = DemoState::new(DemoChoice::Carousel, CraneConfig::default()).unwrap();
        update(&mut state, 0.016).unwrap();

        for (id, object) in state.scene.objects.iter() {
            assert!(!object.transform.is_world_dirty());
            assert_eq!(
                *object.transform.get_world_matrix(),
                state.scene.world_matrix(id)
            );
        }
    }
}
