//! Screens
//!
//! Pure functions from game state to a view tree. One screen per phase.

use super::node::{Action, Node};
use crate::catalog::colors;
use crate::consts::*;
use crate::sim::{GameObject, GamePhase, GameState, TargetEntry};

/// Countdown as `m:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Stacking order: found objects on top, otherwise lower in the scene is nearer
pub fn z_index(obj: &GameObject) -> i32 {
    if obj.found {
        FOUND_Z_INDEX
    } else {
        obj.pos.y.floor() as i32
    }
}

/// Render the current screen
pub fn render(state: &GameState) -> Node {
    let (key, screen) = match state.phase {
        GamePhase::Menu => ("menu", menu(state)),
        GamePhase::Playing => ("playing", playing(state)),
        GamePhase::GameOver => ("gameover", game_over(state)),
        GamePhase::Won => ("won", won(state)),
    };
    Node::div("app").key(key).child(screen)
}

fn mute_button(muted: bool, class: &str) -> Node {
    let (glyph, title) = if muted {
        ("🔇", "Réactiver le son")
    } else {
        ("🔊", "Couper le son")
    };
    Node::new("button")
        .class(class)
        .attr("title", title)
        .action(Action::ToggleMute)
        .text(glyph)
}

fn menu(state: &GameState) -> Node {
    Node::div("screen menu")
        .child(Node::div("badge").child(Node::span("glyph-xl").text("👮")))
        .child(
            Node::new("h1")
                .class("title")
                .style(format!("color: {}", colors::GENDARME_BLUE))
                .text("GENDARME ENQUÊTE"),
        )
        .child(Node::new("p").class("lead").text(
            "Chercheur, nous avons besoin de vous ! Retrouvez les indices et les agents \
             dissimulés dans la foule avant la fin du temps imparti.",
        ))
        .child(
            Node::new("button")
                .class("btn btn-primary btn-lg")
                .action(Action::Start)
                .text("COMMENCER LA MISSION"),
        )
        .child(
            Node::div("menu-footer")
                .child(Node::div("decor").children(
                    ["🚓", "🚨", "🔍"].map(|g| Node::span("glyph-lg").text(g)),
                ))
                .child(mute_button(state.muted, "btn-round")),
        )
}

fn hud(state: &GameState) -> Node {
    let name = state.level().map(|l| l.name).unwrap_or_default();
    let clock_class = if state.time_left < URGENT_SECS {
        "clock urgent"
    } else {
        "clock"
    };

    Node::div("hud")
        .style(format!("background: {}", colors::GENDARME_BLUE))
        .child(
            Node::div("hud-left")
                .child(
                    Node::div("hud-mission")
                        .child(Node::span("hud-label").text("Mission"))
                        .child(Node::span("hud-value").text(name)),
                )
                .child(mute_button(state.muted, "btn-hud")),
        )
        .child(Node::div(clock_class).text(format_clock(state.time_left)))
        .child(
            Node::div("hud-score")
                .child(Node::span("hud-label").text("Score"))
                .child(
                    Node::div("hud-value score")
                        .style(format!("color: {}", colors::GOLD))
                        .text(state.score.to_string()),
                ),
        )
}

fn checklist_tile(entry: &TargetEntry) -> Node {
    let tile = Node::div(if entry.found { "tile found" } else { "tile" })
        .key(entry.id.to_string())
        .attr("title", entry.kind)
        .child(Node::span("tile-glyph").text(entry.glyph));
    if entry.found {
        tile.child(Node::span("tile-check").text("✓"))
    } else {
        tile
    }
}

fn checklist(state: &GameState) -> Node {
    Node::div("checklist")
        .child(Node::span("checklist-label").text("INDICES À TROUVER :"))
        .children(state.targets.iter().map(checklist_tile))
}

fn object_style(obj: &GameObject) -> String {
    let scale = if obj.found { FOUND_SCALE } else { obj.scale };
    let mut style = format!(
        "left: {:.3}%; top: {:.3}%; transform: translate(-50%, -50%) rotate({:.2}deg) scale({:.3}); z-index: {}",
        obj.pos.x,
        obj.pos.y,
        obj.rotation,
        scale,
        z_index(obj)
    );
    if obj.found {
        style.push_str(
            "; opacity: 0.8; filter: drop-shadow(0 0 10px #22c55e); pointer-events: none",
        );
    }
    style
}

fn scene_object(obj: &GameObject) -> Node {
    let node = Node::div(if obj.found { "object found" } else { "object" })
        .key(obj.id.to_string())
        .style(object_style(obj))
        .child(Node::span("object-glyph").text(obj.glyph));
    if obj.found {
        node.child(Node::span("object-check").text("✓"))
    } else {
        node.action(Action::Find(obj.id))
    }
}

fn playing(state: &GameState) -> Node {
    Node::div("screen playing")
        .child(hud(state))
        .child(checklist(state))
        .child(
            Node::div("scene")
                .child(Node::div("scene-grid"))
                .children(state.objects.iter().map(scene_object)),
        )
}

fn final_score(label: &str, score: u32, class: &str) -> Node {
    Node::div(class)
        .child(Node::div("final-label").text(label))
        .child(Node::div("final-score").text(score.to_string()))
}

fn game_over(state: &GameState) -> Node {
    Node::div("screen gameover")
        .child(Node::span("glyph-xl").text("⌛"))
        .child(
            Node::new("h1")
                .class("title")
                .style(format!("color: {}", colors::FRENCH_RED))
                .text("TEMPS ÉCOULÉ !"),
        )
        .child(
            Node::new("p")
                .class("lead")
                .text("L'enquête a échoué. Les indices se sont volatilisés."),
        )
        .child(final_score("Score Final", state.score, "score-card dark"))
        .child(
            Node::new("button")
                .class("btn btn-primary")
                .action(Action::Start)
                .text("RÉESSAYER LA MISSION"),
        )
}

fn won(state: &GameState) -> Node {
    let stars = std::iter::repeat_n("⭐", 3).map(|s| Node::span("star").text(s));
    Node::div("screen won")
        .child(
            Node::div("trophy")
                .child(Node::span("glyph-xxl").text("🏆"))
                .child(Node::span("trophy-agent").text("👮")),
        )
        .child(
            Node::new("h1")
                .class("title")
                .style(format!("color: {}", colors::GENDARME_BLUE))
                .text("FÉLICITATIONS !"),
        )
        .child(Node::new("p").class("lead").text(
            "Votre sens de l'observation est digne d'un commissaire. Vous avez brillamment \
             réussi toutes les missions !",
        ))
        .child(
            final_score("SCORE D'ELITE", state.score, "score-card elite")
                .child(Node::div("stars").children(stars)),
        )
        .child(
            Node::new("button")
                .class("btn btn-primary btn-lg")
                .action(Action::Menu)
                .text("RETOUR AU QUARTIER"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rules;
    use crate::sim::{Intent, step};

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Rules::default());
        step(&mut state, Intent::StartGame);
        state
    }

    fn actions(tree: &Node) -> Vec<Action> {
        let mut nodes = Vec::new();
        tree.find_all(&|n| n.get_action().is_some(), &mut nodes);
        nodes.iter().filter_map(|n| n.get_action()).collect()
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(120), "2:00");
    }

    #[test]
    fn test_menu_screen() {
        let state = GameState::new(1, Rules::default());
        let tree = render(&state);
        let text = tree.text_content();
        assert!(text.contains("GENDARME ENQUÊTE"));
        assert!(text.contains("COMMENCER LA MISSION"));
        assert!(text.contains("🔊"));
        assert_eq!(actions(&tree), vec![Action::Start, Action::ToggleMute]);
    }

    #[test]
    fn test_mute_button_reflects_state() {
        let mut state = GameState::new(1, Rules::default());
        step(&mut state, Intent::ToggleMute);
        let tree = render(&state);
        let button = tree
            .find(&|n| n.get_action() == Some(Action::ToggleMute))
            .unwrap();
        assert_eq!(button.text.as_deref(), Some("🔇"));
        assert_eq!(button.get_attr("title"), Some("Réactiver le son"));
    }

    #[test]
    fn test_hud_shows_mission_clock_score() {
        let mut state = playing_state(2);
        state.score = 300;
        state.time_left = 65;
        let tree = render(&state);

        let hud = tree.find_class("hud").unwrap().text_content();
        assert!(hud.contains("Patrouille de Quartier"));
        assert!(hud.contains("1:05"));
        assert!(hud.contains("300"));
        assert!(!tree.find_class("clock").unwrap().has_class("urgent"));

        state.time_left = 9;
        let tree = render(&state);
        assert!(tree.find_class("clock").unwrap().has_class("urgent"));
    }

    #[test]
    fn test_checklist_tiles_follow_targets() {
        let mut state = playing_state(3);
        let first = state.targets[0].id;
        step(&mut state, Intent::ObjectClicked(first));
        let tree = render(&state);

        let mut tiles = Vec::new();
        tree.find_all(&|n| n.has_class("tile"), &mut tiles);
        assert_eq!(tiles.len(), 5);
        assert!(tiles[0].has_class("found"));
        assert!(tiles[0].text_content().contains('✓'));
        assert!(tiles[1..].iter().all(|t| !t.has_class("found")));
    }

    #[test]
    fn test_scene_objects_positioned_and_clickable() {
        let state = playing_state(4);
        let tree = render(&state);

        let mut objects = Vec::new();
        tree.find_all(&|n| n.has_class("object"), &mut objects);
        assert_eq!(objects.len(), 85);

        for (node, obj) in objects.iter().zip(&state.objects) {
            assert_eq!(node.key.as_deref(), Some(obj.id.to_string().as_str()));
            assert_eq!(node.get_action(), Some(Action::Find(obj.id)));
            let style = node.get_attr("style").unwrap();
            assert!(style.contains(&format!("left: {:.3}%", obj.pos.x)));
            assert!(style.contains(&format!("z-index: {}", obj.pos.y.floor() as i32)));
        }
    }

    #[test]
    fn test_found_object_on_top_and_inert() {
        let mut state = playing_state(5);
        let id = state.targets[0].id;
        step(&mut state, Intent::ObjectClicked(id));

        let obj = state.object(id).unwrap();
        assert_eq!(z_index(obj), 100);

        let tree = render(&state);
        let key = id.to_string();
        let node = tree
            .find_class("scene")
            .and_then(|scene| scene.find(&|n| n.key.as_deref() == Some(key.as_str())))
            .unwrap();
        assert!(node.has_class("found"));
        assert_eq!(node.get_action(), None);
        let style = node.get_attr("style").unwrap();
        assert!(style.contains("scale(1.500)"));
        assert!(style.contains("pointer-events: none"));
        assert!(node.text_content().contains('✓'));
    }

    #[test]
    fn test_lower_objects_stack_above_higher_ones() {
        let state = playing_state(6);
        let mut objs: Vec<&GameObject> = state.objects.iter().collect();
        objs.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        assert!(objs.windows(2).all(|w| z_index(w[0]) <= z_index(w[1])));
    }

    #[test]
    fn test_game_over_screen() {
        let mut state = playing_state(7);
        state.phase = GamePhase::GameOver;
        state.score = 200;
        let tree = render(&state);
        let text = tree.text_content();
        assert!(text.contains("TEMPS ÉCOULÉ !"));
        assert_eq!(tree.find_class("final-score").unwrap().text.as_deref(), Some("200"));
        assert_eq!(actions(&tree), vec![Action::Start]);
    }

    #[test]
    fn test_won_screen() {
        let mut state = playing_state(8);
        state.phase = GamePhase::Won;
        state.score = 2500;
        let tree = render(&state);
        let text = tree.text_content();
        assert!(text.contains("FÉLICITATIONS !"));
        assert!(text.contains("2500"));
        assert_eq!(text.matches('⭐').count(), 3);
        assert_eq!(actions(&tree), vec![Action::Menu]);
    }

    #[test]
    fn test_screens_keyed_by_phase() {
        let menu = render(&GameState::new(9, Rules::default()));
        let game = render(&playing_state(9));
        assert!(!menu.same_shape(&game));
    }
}
