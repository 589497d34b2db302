use dioxus::prelude::*;

/// Drifting teal particle field behind the whole app. Purely decorative,
/// draws itself and never touches application state.
#[component]
pub fn ParticleBackground() -> Element {
    #[cfg(target_arch = "wasm32")]
    use_effect(|| wasm_particles::start());

    rsx! {
        canvas { id: "particle-canvas", class: "particle-canvas" }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_particles {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

    const MAX_PARTICLES: usize = 100;
    const LINK_DISTANCE: f64 = 100.0;

    struct Particle {
        x: f64,
        y: f64,
        size: f64,
        speed_x: f64,
        speed_y: f64,
        alpha: f64,
    }

    fn canvas_and_context() -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas: HtmlCanvasElement = window()?
            .document()?
            .get_element_by_id("particle-canvas")?
            .dyn_into()
            .ok()?;
        let context: CanvasRenderingContext2d =
            canvas.get_context("2d").ok()??.dyn_into().ok()?;
        Some((canvas, context))
    }

    fn seed_particles(width: f64, height: f64) -> Vec<Particle> {
        let count = ((width / 10.0) as usize).min(MAX_PARTICLES);
        (0..count)
            .map(|_| Particle {
                x: js_sys::Math::random() * width,
                y: js_sys::Math::random() * height,
                size: js_sys::Math::random() * 2.0 + 0.5,
                speed_x: (js_sys::Math::random() - 0.5) * 0.5,
                speed_y: (js_sys::Math::random() - 0.5) * 0.5,
                alpha: js_sys::Math::random() * 0.5 + 0.1,
            })
            .collect()
    }

    fn resize_to_viewport(canvas: &HtmlCanvasElement) -> (f64, f64) {
        let width = window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0);
        let height = window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        (width, height)
    }

    fn draw_frame(context: &CanvasRenderingContext2d, particles: &mut [Particle], width: f64, height: f64) {
        context.clear_rect(0.0, 0.0, width, height);

        for particle in particles.iter_mut() {
            particle.x += particle.speed_x;
            particle.y += particle.speed_y;

            if particle.x > width {
                particle.x = 0.0;
            }
            if particle.x < 0.0 {
                particle.x = width;
            }
            if particle.y > height {
                particle.y = 0.0;
            }
            if particle.y < 0.0 {
                particle.y = height;
            }
        }

        for (index, particle) in particles.iter().enumerate() {
            context.begin_path();
            let _ = context.arc(
                particle.x,
                particle.y,
                particle.size,
                0.0,
                std::f64::consts::PI * 2.0,
            );
            context.set_fill_style_str(&format!("rgba(0, 128, 128, {})", particle.alpha));
            context.fill();

            for other in particles.iter().skip(index + 1) {
                let dx = particle.x - other.x;
                let dy = particle.y - other.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < LINK_DISTANCE {
                    context.begin_path();
                    context.set_stroke_style_str(&format!(
                        "rgba(0, 128, 128, {})",
                        0.1 * (1.0 - distance / LINK_DISTANCE)
                    ));
                    context.set_line_width(0.5);
                    context.move_to(particle.x, particle.y);
                    context.line_to(other.x, other.y);
                    context.stroke();
                }
            }
        }
    }

    pub fn start() {
        let Some((canvas, context)) = canvas_and_context() else {
            return;
        };

        let (width, height) = resize_to_viewport(&canvas);
        let particles = Rc::new(RefCell::new(seed_particles(width, height)));

        // Re-seed on resize so density tracks the viewport.
        {
            let canvas = canvas.clone();
            let particles = Rc::clone(&particles);
            let resize_cb = Closure::wrap(Box::new(move || {
                let (width, height) = resize_to_viewport(&canvas);
                *particles.borrow_mut() = seed_particles(width, height);
            }) as Box<dyn FnMut()>);
            if let Some(win) = window() {
                let _ = win
                    .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
            }
            resize_cb.forget();
        }

        // Self-rescheduling animation frame loop.
        let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let frame_clone = Rc::clone(&frame);
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let width = canvas.width() as f64;
            let height = canvas.height() as f64;
            draw_frame(&context, &mut particles.borrow_mut(), width, height);

            if let (Some(win), Some(cb)) = (window(), frame_clone.borrow().as_ref()) {
                let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }) as Box<dyn FnMut()>));

        if let (Some(win), Some(cb)) = (window(), frame.borrow().as_ref()) {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
