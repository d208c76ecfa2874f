use egui::{Align2, Color32, Context, Id, InnerResponse, Order, Vec2};

pub struct Modal<'a> {
    title: String,
    open: Option<&'a mut bool>,
    id: Id,
    resizable: bool,
    fixed_size: Option<Vec2>,
    anchor: Option<(Align2, Vec2)>,
}

impl<'a> Modal<'a> {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: Id::new(&title),
            title,
            open: None,
            resizable: true,
            fixed_size: None,
            anchor: None,
        }
    }

    /// Several pickers share one title, so each passes its own id.
    pub fn id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    pub fn open(mut self, open: &'a mut bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn fixed_size(mut self, size: impl Into<Vec2>) -> Self {
        self.fixed_size = Some(size.into());
        self
    }

    pub fn anchor(mut self, align: Align2, offset: impl Into<Vec2>) -> Self {
        self.anchor = Some((align, offset.into()));
        self
    }

    #[allow(deprecated)]
    pub fn show<R>(
        self,
        ctx: &Context,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> Option<InnerResponse<Option<R>>> {
        let is_open = match &self.open {
            Some(open) => **open,
            None => true,
        };
        if !is_open {
            return None;
        }

        // Backdrop blocks the node canvas while the modal is up
        egui::Area::new(self.id.with("backdrop"))
            .interactable(true)
            .fixed_pos(egui::pos2(0.0, 0.0))
            .order(Order::Middle)
            .show(ctx, |ui| {
                let screen_rect = ctx.input(|i| i.screen_rect());
                ui.allocate_rect(screen_rect, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(100));
            });

        let mut window = egui::Window::new(&self.title)
            .id(self.id)
            .resizable(self.resizable)
            .collapsible(false)
            .order(Order::Foreground);

        if let Some(open) = self.open {
            window = window.open(open);
        }
        if let Some(size) = self.fixed_size {
            window = window.fixed_size(size);
        }
        if let Some((align, offset)) = self.anchor {
            window = window.anchor(align, offset);
        } else {
            window = window.default_pos(ctx.input(|i| i.screen_rect()).center());
        }

        window.show(ctx, add_contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui_kittest::Harness;
    use egui_kittest::kittest::Queryable;

    #[test]
    fn test_modal_shows_title_and_content() {
        let harness = Harness::builder()
            .with_size(egui::vec2(400.0, 300.0))
            .build(|ctx| {
                Modal::new("Assets").show(ctx, |ui| {
                    ui.label("Pump 7");
                });
            });
        // タイトルとコンテンツがアクセシビリティツリーに存在する
        assert!(harness.query_by_label("Assets").is_some());
        assert!(harness.query_by_label("Pump 7").is_some());
    }

    #[test]
    fn test_modal_hidden_when_closed() {
        let harness = Harness::builder()
            .with_size(egui::vec2(400.0, 300.0))
            .build(|ctx| {
                let mut open = false;
                Modal::new("Assets").open(&mut open).show(ctx, |ui| {
                    ui.label("Should not appear");
                });
            });
        assert!(harness.query_by_label("Should not appear").is_none());
    }

    #[test]
    fn test_modals_with_same_title_keep_separate_ids() {
        let harness = Harness::builder()
            .with_size(egui::vec2(600.0, 400.0))
            .build(|ctx| {
                Modal::new("Assets")
                    .id(Id::new("first"))
                    .anchor(Align2::LEFT_TOP, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label("first body");
                    });
                Modal::new("Assets")
                    .id(Id::new("second"))
                    .anchor(Align2::RIGHT_TOP, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label("second body");
                    });
            });
        assert!(harness.query_by_label("first body").is_some());
        assert!(harness.query_by_label("second body").is_some());
    }

    #[test]
    fn button_click_inside_modal_detected() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let clicked = Rc::new(RefCell::new(false));
        let c = clicked.clone();

        let mut harness = Harness::builder()
            .with_size(egui::vec2(400.0, 300.0))
            .build(move |ctx| {
                let c2 = c.clone();
                Modal::new("Interactive Modal")
                    .fixed_size([200.0, 120.0])
                    .resizable(false)
                    .show(ctx, |ui| {
                        if ui.button("Select").clicked() {
                            *c2.borrow_mut() = true;
                        }
                    });
            });

        harness.get_by_label("Select").click();
        harness.run();

        assert!(*clicked.borrow());
    }
}
