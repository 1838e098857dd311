//! GDisc entry point
//!
//! Browser builds mount the score table into the page; native builds offer
//! a small command line over a JSON save file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement};

    use gdisc::grid::{GridEvent, ScoreGrid};
    use gdisc::platform::{KeyValueStore, LocalStorage, MemoryStore};
    use gdisc::ui::{CellKind, EditTarget, TableView, time_info_lines};

    type Grid = ScoreGrid<Box<dyn KeyValueStore>>;

    /// Page state: the grid plus events it raised since the last refresh
    struct App {
        grid: Grid,
        pending: Rc<RefCell<Vec<GridEvent>>>,
    }

    impl App {
        fn new(mut grid: Grid) -> Self {
            let pending = Rc::new(RefCell::new(Vec::new()));
            let sink = pending.clone();
            grid.subscribe(move |event| sink.borrow_mut().push(*event));
            Self { grid, pending }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("GDisc starting...");

        let store: Box<dyn KeyValueStore> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{} - scores will not survive a reload", e);
                Box::new(MemoryStore::new())
            }
        };

        let app = Rc::new(RefCell::new(App::new(ScoreGrid::new(store))));

        render_title(&app);
        render_table(&app);
        render_time_info(&app.borrow().grid);

        setup_grid_input(app.clone());
        setup_title_input(app.clone());
        setup_restart_button(
            app.clone(),
            "new-game-btn",
            "Start a new game? All players and scores will be lost.",
            Grid::reset,
        );
        setup_restart_button(
            app.clone(),
            "same-players-btn",
            "Start a new game with the same players?",
            Grid::start_new_game,
        );
        setup_restart_button(app, "reset-score-btn", "Clear all scores?", Grid::reset_score);

        log::info!("GDisc running!");
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Apply whatever changed since the last refresh
    fn refresh(app: &Rc<RefCell<App>>) {
        let events: Vec<GridEvent> = app.borrow().pending.borrow_mut().drain(..).collect();
        if events.iter().any(GridEvent::needs_full_redraw) {
            render_title(app);
            render_table(app);
        } else {
            let a = app.borrow();
            for event in &events {
                if let GridEvent::CellChanged { row, .. } = event {
                    update_total(&a.grid, *row);
                }
            }
        }

        let a = app.borrow();
        render_time_info(&a.grid);
        if let Some(el) = document().get_element_by_id("save-status") {
            let text = if a.grid.is_saved() { "" } else { "Changes not saved" };
            el.set_text_content(Some(text));
        }
    }

    fn render_title(app: &Rc<RefCell<App>>) {
        let a = app.borrow();
        let document = document();
        if let Some(el) = document.get_element_by_id("title") {
            el.set_text_content(Some(a.grid.title()));
        }
        if let Some(input) = document
            .get_element_by_id("title-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(a.grid.title());
        }
    }

    fn render_table(app: &Rc<RefCell<App>>) {
        let document = document();
        let Some(container) = document.get_element_by_id("grid-container") else {
            return;
        };
        container.set_inner_html("");

        let view = TableView::from_matrix(app.borrow().grid.matrix());
        let table = document.create_element("table").unwrap();
        table.set_class_name("editable-grid");

        let header = document.create_element("tr").unwrap();
        for label in &view.header {
            let th = document.create_element("th").unwrap();
            th.set_text_content(Some(label));
            let _ = header.append_child(&th);
        }
        let _ = table.append_child(&header);

        for row in &view.rows {
            let tr = document.create_element("tr").unwrap();
            for cell in row {
                let td = document.create_element("td").unwrap();
                td.set_class_name(cell.kind.css_class());

                let input: HtmlInputElement = document
                    .create_element("input")
                    .unwrap()
                    .dyn_into()
                    .unwrap();
                input.set_type(cell.kind.input_type());
                input.set_value(&cell.value);
                input.set_read_only(!cell.kind.editable());

                if let Some(target) = cell.edit_target() {
                    for (name, value) in target.attrs() {
                        let _ = input.set_attribute(name, &value);
                    }
                }
                match cell.kind {
                    CellKind::Score => input.set_min("0"),
                    CellKind::Total => input.set_id(&format!("total-{}", cell.row)),
                    CellKind::Name => {}
                }

                let _ = td.append_child(&input);
                let _ = tr.append_child(&td);
            }
            let _ = table.append_child(&tr);
        }

        let _ = container.append_child(&table);
    }

    fn update_total(grid: &Grid, row: usize) {
        if let Some(input) = document()
            .get_element_by_id(&format!("total-{}", row))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(grid.total(row).unwrap_or("0"));
        }
    }

    fn render_time_info(grid: &Grid) {
        let Some(container) = document().get_element_by_id("time-info-container") else {
            return;
        };
        let [started, updated] =
            time_info_lines(grid.start_time(), grid.last_updated_time(), |t| {
                let date = js_sys::Date::new(&JsValue::from_f64(t.timestamp_millis() as f64));
                String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
            });
        container.set_inner_html("");
        for (id, text) in [("game-start-time", started), ("game-last-updated-time", updated)] {
            let div = document().create_element("div").unwrap();
            div.set_id(id);
            div.set_text_content(Some(&text));
            let _ = container.append_child(&div);
        }
    }

    /// One listener on the container serves every cell, across re-renders
    fn setup_grid_input(app: Rc<RefCell<App>>) {
        let Some(container) = document().get_element_by_id("grid-container") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(target) = EditTarget::from_attrs(
                input.get_attribute("data-row").as_deref(),
                input.get_attribute("data-col").as_deref(),
            ) else {
                return;
            };
            let value = input.value();
            let result = match target {
                EditTarget::Score { row, col } => {
                    app.borrow_mut().grid.set_cell_value(row, col, &value)
                }
                EditTarget::Name { row } => app.borrow_mut().grid.set_player_name(row, &value),
            };
            if let Err(e) = result {
                log::error!("{}", e);
            }
            refresh(&app);
        });
        let _ =
            container.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_title_input(app: Rc<RefCell<App>>) {
        let Some(input) = document().get_element_by_id("title-input") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            if let Some(value) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|i| i.value())
            {
                app.borrow_mut().grid.set_title(&value);
                if let Some(el) = document().get_element_by_id("title") {
                    el.set_text_content(Some(&value));
                }
                refresh(&app);
            }
        });
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(
        app: Rc<RefCell<App>>,
        id: &str,
        question: &'static str,
        action: fn(&mut Grid),
    ) {
        let Some(btn) = document().get_element_by_id(id) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message(question).ok())
                .unwrap_or(false);
            if confirmed {
                action(&mut app.borrow_mut().grid);
                refresh(&app);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: gdisc [--file PATH] [show | name ROW TEXT | score ROW COL TEXT | title TEXT | new-game | same-players | reset-score]";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut path = "gdisc.json".to_string();
    if args.first().map(String::as_str) == Some("--file") {
        if args.len() < 2 {
            eprintln!("{}", USAGE);
            return std::process::ExitCode::from(2);
        }
        path = args.remove(1);
        args.remove(0);
    }

    let store = gdisc::platform::FileStore::new(&path);
    let mut grid = gdisc::ScoreGrid::new(store);

    if let Err(msg) = apply_command(&mut grid, &args) {
        eprintln!("{}\n{}", msg, USAGE);
        return std::process::ExitCode::from(2);
    }
    if let Some(e) = grid.last_save_error() {
        eprintln!("Changes not saved: {}", e);
    }

    println!("{}\n", grid.title());
    println!("{}\n", gdisc::ui::TableView::from_matrix(grid.matrix()).to_text());
    for line in gdisc::ui::time_info_lines(grid.start_time(), grid.last_updated_time(), |t| {
        t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string()
    }) {
        println!("{}", line);
    }
    std::process::ExitCode::SUCCESS
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_command<S: gdisc::platform::KeyValueStore>(
    grid: &mut gdisc::ScoreGrid<S>,
    args: &[String],
) -> Result<(), String> {
    fn index(arg: Option<&String>, what: &str) -> Result<usize, String> {
        arg.ok_or_else(|| format!("missing {}", what))?
            .parse()
            .map_err(|_| format!("{} must be a number", what))
    }
    let text = |from: usize| args.get(from..).map(|rest| rest.join(" ")).unwrap_or_default();

    match args.first().map(String::as_str) {
        None | Some("show") => Ok(()),
        Some("name") => {
            let row = index(args.get(1), "ROW")?;
            grid.set_player_name(row, &text(2)).map_err(|e| e.to_string())
        }
        Some("score") => {
            let row = index(args.get(1), "ROW")?;
            let col = index(args.get(2), "COL")?;
            grid.set_cell_value(row, col, &text(3)).map_err(|e| e.to_string())
        }
        Some("title") => {
            grid.set_title(&text(1));
            Ok(())
        }
        Some("new-game") => {
            grid.reset();
            Ok(())
        }
        Some("same-players") => {
            grid.start_new_game();
            Ok(())
        }
        Some("reset-score") => {
            grid.reset_score();
            Ok(())
        }
        Some(other) => Err(format!("unknown command `{}`", other)),
    }
}
