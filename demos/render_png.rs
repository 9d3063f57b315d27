use softshadow::config::AttributeMap;
use softshadow::math::{euclid::point2, RectI32, SizeI32};
use softshadow::raster::RenderMode;
use softshadow::{Node, ShadowLayout, ViewTree};

fn main() {
    // Set up logging stuff
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", "debug");
    env_logger::init_from_env(env);

    let out_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("shadow.png"));

    let attributes = AttributeMap::parse(
        r##"app:corner_radius="8dp" app:shadow_radius="12dp" app:dy="3dp"
            app:shadow_color="#66000000" app:fill_color="#FFFAFAFA""##,
    )
    .expect("invalid attribute markup")
    .with_density(1.5_f32);

    let mut tree = ViewTree::new();
    let window = tree.insert(Node::container());
    let page = tree.insert(Node::container());
    tree.append_child(window, page).unwrap();

    let mut card =
        ShadowLayout::from_attributes(&mut tree, Some(&attributes), RenderMode::Interactive);
    tree.append_child(page, card.node()).unwrap();

    let label = tree.insert(Node::leaf());
    card.add_child(&mut tree, label).unwrap();

    card.on_layout(&mut tree, RectI32::new(point2(24, 24), SizeI32::new(240, 120)))
        .expect("failed to lay out shadow");

    let bitmap = card
        .shadow_bitmap(&tree)
        .expect("shadow should be present after layout");

    bitmap.image().save(&out_path).expect("failed to write png");
    println!(
        "wrote {}x{} shadow to {out_path}",
        bitmap.width(),
        bitmap.height()
    );
}
