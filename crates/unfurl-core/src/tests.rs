#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::*;
    use web_time::{Duration, Instant};

    fn shaper() -> FixedAdvanceShaper {
        FixedAdvanceShaper {
            advance: 0.5,
            line_height: 1.5,
            ascent: 0.75,
        }
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_color_mul_alpha_clamps() {
        assert_eq!(Color::WHITE.mul_alpha(0.5).3, 128);
        assert_eq!(Color::WHITE.mul_alpha(-1.0).3, 0);
        assert_eq!(Color::WHITE.mul_alpha(3.0).3, 255);
        assert_eq!(Color::WHITE.mul_alpha(f32::NAN).3, 0);
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert_eq!(rect.min_x(), 10.0);
        assert_eq!(rect.max_x(), 110.0);
        assert_eq!(rect.mid_y(), 35.0);
        assert_eq!(rect.max_y(), 60.0);
    }

    #[test]
    fn test_size_sanitized() {
        let s = Size::new(-3.0, f32::INFINITY).sanitized();
        assert_eq!(s, Size::ZERO);
    }

    #[test]
    fn test_animation_deterministic() {
        let t0 = Instant::now();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target_at(10.0, t0);
        assert!(a.update_at(t0 + Duration::from_millis(250)));
        assert!((*a.get() - 2.5).abs() < 0.01);

        let cont = a.update_at(t0 + Duration::from_millis(1000));
        assert!(!cont);
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_animation_retarget_continues_from_sample() {
        let t0 = Instant::now();
        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target_at(1.0, t0);
        a.update_at(t0 + Duration::from_millis(400));
        let sampled = *a.get();

        let t1 = t0 + Duration::from_millis(400);
        a.set_target_at(0.0, t1);
        a.update_at(t1);
        assert!((*a.get() - sampled).abs() < 1e-6);

        a.update_at(t1 + Duration::from_millis(500));
        assert!((*a.get() - sampled * 0.5).abs() < 0.01);
    }

    #[test]
    fn test_animation_delay_and_snap() {
        let t0 = Instant::now();
        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear)
            .with_delay(Duration::from_millis(50));
        let mut a = AnimatedValue::new(0.0f32, spec);
        a.set_target_at(1.0, t0);
        assert!(a.update_at(t0 + Duration::from_millis(20)));
        assert_eq!(*a.get(), 0.0);

        a.snap_to(1.0);
        assert!(!a.is_animating());
        assert_eq!(*a.get(), 1.0);
        assert!(!a.update_at(t0 + Duration::from_millis(60)));
    }

    #[test]
    fn test_manual_clock_drives_update() {
        let clock = ManualClock::new(Instant::now());
        assert_eq!(clock.now(), clock.now());
        let before = clock.now();
        clock.advance(Duration::from_millis(16));
        assert_eq!(clock.now() - before, Duration::from_millis(16));
    }

    #[test]
    fn test_spring_overshoots() {
        let e = Easing::Spring {
            damping: 0.8,
            stiffness: 200.0,
        };
        let peak = (1..100)
            .map(|i| e.interpolate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_fixed_shaper_wraps_and_measures() {
        let layout = shaper().shape("abcdefgh\nxy", 10.0, Some(20.0));
        // 20px at 5px per grapheme: four columns
        let texts: Vec<String> = layout.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "xy"]);
        assert_eq!(layout.size(), Size::new(20.0, 45.0));
        assert_eq!(layout.size_capped(2), Size::new(20.0, 30.0));
        assert_eq!(layout.size_capped(0), Size::ZERO);
        assert_eq!(shaper().measure_width("More", 10.0), 20.0);
    }

    #[test]
    fn test_fixed_shaper_slices_are_graphemes() {
        let layout = shaper().shape("e\u{301}a", 10.0, None);
        let line = &layout.lines[0];
        assert_eq!(line.slices().count(), 2);
        assert_eq!(line.slices().next().map(|s| s.ascent), Some(7.5));
    }

    #[test]
    fn test_draw_scope_to_scene_culls_transparent() {
        let layout = shaper().shape("ab\ncd", 10.0, None);
        let mut scope = DrawScope::new();
        scope.draw_line(0, &layout.lines[0], 1.0, 0.0);
        scope.draw_line(1, &layout.lines[1], 0.0, 6.0);
        scope.draw_label("More", Vec2 { x: 10.0, y: 7.5 }, 20.0, 10.0, Color::GRAY, 1.5);

        assert_eq!(scope.ops[2].opacity(), 1.0);
        assert_eq!(scope.ops[1].blur(), 6.0);

        let scene = scope.to_scene(Vec2 { x: 100.0, y: 0.0 }, Color::WHITE);
        assert_eq!(scene.nodes.len(), 2);
        let SceneNode::Text { rect, color, .. } = &scene.nodes[1];
        assert_eq!(rect.x, 100.0);
        assert_eq!(rect.y, 2.5);
        assert_eq!(*color, Color::GRAY);
    }
}
