//! Playground Energy entry point
//!
//! On the web this wires the page to the simulation clock. Natively it runs
//! a headless tour of every apparatus and logs the meters.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use playground_energy::PlaybackPreset;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement};

    use playground_energy::platform::web::{AnimationLoop, FrameRequest};
    use playground_energy::quiz::{AnswerFeedback, AnswerOutcome, QuizSession};
    use playground_energy::renderer::DomRenderer;
    use playground_energy::sim::{Apparatus, SimulationClock};
    use playground_energy::{Progress, Settings};

    const MAP_VIEW: &str = "view-map";
    const COMPONENT_VIEW: &str = "view-component";

    /// Application instance holding all state
    struct App {
        clock: SimulationClock,
        renderer: DomRenderer,
        animation: AnimationLoop,
        quiz: Option<QuizSession>,
        progress: Progress,
        settings: Settings,
        /// Seeds the option shuffle when no fixed seed is configured
        session_seed: u64,
        document: Document,
    }

    impl App {
        fn new(document: Document, settings: Settings, progress: Progress, seed: u64) -> Self {
            Self {
                clock: SimulationClock::new(settings.playback_speed()),
                renderer: DomRenderer::new(document.clone(), settings.show_meter_values),
                animation: AnimationLoop::new(),
                quiz: None,
                progress,
                settings,
                session_seed: seed,
                document,
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn sync_play_button(&self) {
            let label = if self.clock.is_playing() { "Pause" } else { "Start" };
            self.set_text("playPauseBtn", label);
        }

        fn update_stats(&self) {
            self.set_text("progressText", &self.progress.completed_text());
            self.set_text("totalScore", &self.progress.score_text());
        }

        fn show_view(&self, view_id: &str) {
            if let Ok(views) = self.document.query_selector_all(".view") {
                for i in 0..views.length() {
                    if let Some(view) = views.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                        let _ = view.class_list().add_1("hidden");
                    }
                }
            }
            if let Some(view) = self.document.get_element_by_id(view_id) {
                let _ = view.class_list().remove_1("hidden");
            }
        }

        fn slider(&self) -> Option<HtmlInputElement> {
            self.document
                .get_element_by_id("sim-slider")?
                .dyn_into::<HtmlInputElement>()
                .ok()
        }

        /// Move the slider to match the clock
        fn sync_slider(&self) {
            if let Some(slider) = self.slider() {
                slider.set_value(&format!("{}", self.clock.control()));
            }
        }

        /// Stop the loop, both in the clock and in the browser
        fn pause(&mut self) -> bool {
            let paused = self.clock.pause();
            self.animation.cancel();
            self.sync_play_button();
            paused
        }

        /// Show the page for `apparatus` with a fresh quiz
        fn open(&mut self, apparatus: Apparatus) {
            self.animation.cancel();
            self.show_view(COMPONENT_VIEW);
            self.renderer.invalidate();
            self.clock.select(apparatus, &mut self.renderer);

            let info = apparatus.info();
            self.set_text("comp-title", info.title);
            self.set_text("comp-explanation", info.explanation);
            self.set_text("slider-label", info.control_label);
            self.sync_slider();
            self.sync_play_button();

            let quiz = QuizSession::from_settings(apparatus, &self.settings, self.session_seed);
            self.render_quiz(&quiz);
            self.quiz = Some(quiz);
        }

        fn go_home(&mut self) {
            self.animation.cancel();
            self.clock.leave();
            self.quiz = None;
            self.show_view(MAP_VIEW);
            self.sync_play_button();
        }

        fn render_quiz(&self, quiz: &QuizSession) {
            let Some(container) = self.document.get_element_by_id("quiz-container") else {
                return;
            };
            container.set_inner_html("");
            for (q_idx, question) in quiz.questions().iter().enumerate() {
                let Ok(block) = self.build_question(q_idx, question.prompt(), question.options())
                else {
                    log::warn!("Could not build quiz question {}", q_idx + 1);
                    continue;
                };
                let _ = container.append_child(&block);
            }
        }

        fn build_question<'a>(
            &self,
            q_idx: usize,
            prompt: &str,
            options: impl Iterator<Item = &'a str>,
        ) -> Result<Element, JsValue> {
            let doc = &self.document;
            let block = doc.create_element("div")?;
            block.set_class_name("quiz-q");
            block.set_id(&format!("quiz-q{}", q_idx));

            let heading = doc.create_element("p")?;
            let strong = doc.create_element("strong")?;
            strong.set_text_content(Some(&format!("Q{}: {}", q_idx + 1, prompt)));
            heading.append_child(&strong)?;
            block.append_child(&heading)?;

            let list = doc.create_element("div")?;
            list.set_class_name("options");
            list.set_id(&format!("quiz-q{}-options", q_idx));
            for (o_idx, label) in options.enumerate() {
                let btn = doc.create_element("button")?;
                btn.set_class_name("option-btn");
                btn.set_attribute("data-question", &q_idx.to_string())?;
                btn.set_attribute("data-option", &o_idx.to_string())?;
                btn.set_text_content(Some(label));
                list.append_child(&btn)?;
            }
            block.append_child(&list)?;
            Ok(block)
        }

        fn answer(&mut self, q_idx: usize, o_idx: usize) {
            let Some(quiz) = self.quiz.as_mut() else {
                return;
            };
            match quiz.answer(q_idx, o_idx, &mut self.progress) {
                Ok(AnswerOutcome::Answered(feedback)) => {
                    if let Err(e) = self.mark_answer(q_idx, o_idx, &feedback) {
                        log::warn!("Could not show quiz feedback: {:?}", e);
                    }
                    self.update_stats();
                    if feedback.points_awarded > 0 {
                        self.progress.save();
                    }
                }
                Ok(AnswerOutcome::AlreadyAnswered) => {}
                Err(e) => log::warn!("Ignoring quiz click: {}", e),
            }
        }

        fn mark_answer(
            &self,
            q_idx: usize,
            o_idx: usize,
            feedback: &AnswerFeedback,
        ) -> Result<(), JsValue> {
            let doc = &self.document;
            let list_id = format!("quiz-q{}-options", q_idx);
            if let Some(list) = doc.get_element_by_id(&list_id) {
                list.class_list().add_1("answered")?;
            }
            let option = |idx: usize| {
                doc.query_selector(&format!("#{} [data-option=\"{}\"]", list_id, idx))
                    .ok()
                    .flatten()
            };
            if let Some(btn) = option(o_idx) {
                let class = if feedback.correct { "correct" } else { "wrong" };
                btn.class_list().add_1(class)?;
            }
            if !feedback.correct {
                if let Some(btn) = option(feedback.correct_option) {
                    btn.class_list().add_1("correct")?;
                }
            }

            if let Some(block) = doc.get_element_by_id(&format!("quiz-q{}", q_idx)) {
                let note = doc.create_element("p")?;
                note.set_class_name("quiz-feedback");
                let em = doc.create_element("em")?;
                em.set_text_content(Some(feedback.feedback));
                note.append_child(&em)?;
                block.append_child(&note)?;
            }
            Ok(())
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Playground Energy starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, nothing to run");
            return;
        };

        let settings = Settings::load();
        let progress = Progress::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(document, settings, progress, seed)));

        setup_map_buttons(app.clone());
        setup_controls(app.clone());
        setup_navigation(app.clone());
        setup_quiz(app.clone());
        setup_auto_pause(app.clone());

        {
            let a = app.borrow();
            a.show_view(MAP_VIEW);
            a.update_stats();
            a.sync_play_button();
        }

        log::info!("Playground Energy running!");
    }

    fn schedule_tick(app: &Rc<RefCell<App>>) {
        let next = app.clone();
        let request = FrameRequest::schedule(move |time: f64| on_frame(next, time));
        app.borrow_mut().animation.set_pending(request);
    }

    fn on_frame(app: Rc<RefCell<App>>, time: f64) {
        let keep_running = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            let dt = a.animation.frame_dt(time);
            let Some(handle) = a.animation.handle() else {
                return;
            };
            let keep_running = a.clock.tick(handle, dt, &mut a.renderer).keep_running();
            if !keep_running {
                a.animation.cancel();
                a.sync_play_button();
            }
            keep_running
        };

        if keep_running {
            schedule_tick(&app);
        }
    }

    fn add_click(element: &Element, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
        let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_map_buttons(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();
        let Ok(buttons) = document.query_selector_all("[data-apparatus]") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(id) = btn.get_attribute("data-apparatus") else {
                continue;
            };
            let app = app.clone();
            add_click(&btn, move |_event| match Apparatus::from_id(&id) {
                Ok(apparatus) => app.borrow_mut().open(apparatus),
                Err(e) => log::error!("Map button: {}", e),
            });
        }
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();

        if let Some(btn) = document.get_element_by_id("homeBtn") {
            let app = app.clone();
            add_click(&btn, move |_event| app.borrow_mut().go_home());
        }

        if let Some(btn) = document.get_element_by_id("playPauseBtn") {
            let app = app.clone();
            add_click(&btn, move |_event| {
                let started = {
                    let mut a = app.borrow_mut();
                    let started = match a.clock.toggle() {
                        Ok(Some(handle)) => {
                            a.animation.arm(handle);
                            true
                        }
                        Ok(None) => {
                            a.animation.cancel();
                            false
                        }
                        Err(e) => {
                            log::warn!("Play ignored: {}", e);
                            false
                        }
                    };
                    a.sync_play_button();
                    started
                };
                if started {
                    schedule_tick(&app);
                }
            });
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let app = app.clone();
            add_click(&btn, move |_event| {
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.animation.cancel();
                a.clock.reset(&mut a.renderer);
                a.sync_slider();
                a.sync_play_button();
            });
        }

        let slider = app.borrow().slider();
        if let Some(slider) = slider {
            let app = app.clone();
            let input = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(value) = input.value().parse::<f32>() else {
                    return;
                };
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.clock.set_control(value, &mut a.renderer);
            });
            let _ =
                slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_navigation(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();
        for (id, step) in [
            ("prevCompBtn", Apparatus::prev as fn(Apparatus) -> Apparatus),
            ("nextCompBtn", Apparatus::next),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            add_click(&btn, move |_event| {
                let mut a = app.borrow_mut();
                if let Some(current) = a.clock.apparatus() {
                    a.open(step(current));
                }
            });
        }
    }

    /// One listener on the container handles every option button
    fn setup_quiz(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();
        let Some(container) = document.get_element_by_id("quiz-container") else {
            return;
        };
        add_click(&container, move |event| {
            let Some((q_idx, o_idx)) = clicked_option(&event) else {
                return;
            };
            app.borrow_mut().answer(q_idx, o_idx);
        });
    }

    fn clicked_option(event: &web_sys::MouseEvent) -> Option<(usize, usize)> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        let q_idx = target.get_attribute("data-question")?.parse().ok()?;
        let o_idx = target.get_attribute("data-option")?.parse().ok()?;
        Some((q_idx, o_idx))
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let document = app.borrow().document.clone();

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() != web_sys::VisibilityState::Hidden {
                    return;
                }
                let mut a = app.borrow_mut();
                if a.settings.auto_pause_on_hidden && a.pause() {
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.settings.auto_pause_on_hidden && a.pause() {
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod tour {
    use playground_energy::consts::SIM_DT;
    use playground_energy::quiz::{AnswerOutcome, QuizSession};
    use playground_energy::sim::{Apparatus, Frame, FrameSink, SimulationClock};
    use playground_energy::{PlaybackPreset, Progress, Settings};

    /// Real seconds of animation per apparatus
    const TOUR_SECONDS: f32 = 4.0;
    /// Log one frame in this many
    const LOG_EVERY: usize = 30;

    /// Sink that logs a sample of the frames it receives
    struct LogSink {
        presented: usize,
    }

    impl FrameSink for LogSink {
        fn present(&mut self, frame: &Frame) {
            if self.presented % LOG_EVERY == 0 {
                log::info!(
                    "{:>10} t={:5.2}s  GPE {:5.1}%  KE {:5.1}%  loss {:5.1}%",
                    frame.apparatus,
                    frame.elapsed,
                    frame.energy.gpe,
                    frame.energy.ke,
                    frame.energy.loss
                );
            }
            self.presented += 1;
        }
    }

    pub fn run(preset: PlaybackPreset) {
        let settings = Settings::from_preset(preset);
        let mut clock = SimulationClock::new(settings.playback_speed());
        let mut sink = LogSink { presented: 0 };
        let mut progress = Progress::new();
        log::info!(
            "Touring {} apparatuses at {} speed",
            Apparatus::ALL.len(),
            preset.as_str()
        );

        let frames = (TOUR_SECONDS / SIM_DT).round() as usize;
        for apparatus in Apparatus::ALL {
            sink.presented = 0;
            clock.select(apparatus, &mut sink);
            let handle = match clock.start() {
                Ok(handle) => handle,
                Err(e) => {
                    log::error!("Could not start {}: {}", apparatus, e);
                    continue;
                }
            };
            for _ in 0..frames {
                if !clock.tick(handle, SIM_DT, &mut sink).keep_running() {
                    break;
                }
            }
            if let Some(frame) = clock.frame() {
                match serde_json::to_string(&frame) {
                    Ok(json) => log::debug!("Last frame: {}", json),
                    Err(e) => log::warn!("Could not serialize frame: {}", e),
                }
            }
            clock.reset(&mut sink);

            // Answer the first question with the right option
            let mut quiz = QuizSession::new(apparatus);
            if let Some(question) = quiz.questions().first() {
                let correct = question.correct_option();
                if let Ok(AnswerOutcome::Answered(fb)) = quiz.answer(0, correct, &mut progress) {
                    log::info!("{:>10} quiz: {}", apparatus, fb.feedback);
                }
            }
        }
        clock.leave();

        log::info!("{} | {}", progress.completed_text(), progress.score_text());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Playground Energy (native) starting...");
    log::info!("The interactive page is the wasm build; running a headless tour");

    let preset = std::env::args()
        .nth(1)
        .and_then(|arg| PlaybackPreset::from_str(&arg))
        .unwrap_or_default();
    tour::run(preset);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
