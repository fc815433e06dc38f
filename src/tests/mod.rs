#[cfg(test)]
mod formatting_tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use crate::{
        Collaborators, ContainerInstance, ContainerRenderer, DatabaseRow, DefaultNodeFactory,
        ElementConfig, ElementKind, IconProvider, IconSize, Node, NodeFactory, RenderContext,
        RenderMode, RenderResult, Result, SequentialIdGenerator, StaticPermissions,
    };

    struct BracketIcons;

    impl IconProvider for BracketIcons {
        fn icon(&self, identifier: &str, _size: IconSize) -> String {
            format!("[i:{}]", identifier)
        }
    }

    /// Child node returning fixed output and remembering the contexts it saw
    struct CannedChild {
        result: RenderResult,
        seen: Arc<Mutex<Vec<RenderContext>>>,
    }

    impl Node for CannedChild {
        fn render(&self, context: &RenderContext) -> Result<RenderResult> {
            self.seen.lock().unwrap().push(context.clone());
            Ok(self.result.clone())
        }
    }

    struct CannedFactory {
        result: RenderResult,
        seen: Arc<Mutex<Vec<RenderContext>>>,
    }

    impl NodeFactory for CannedFactory {
        fn create(&self, _context: &RenderContext) -> Result<Box<dyn Node>> {
            Ok(Box::new(CannedChild {
                result: self.result.clone(),
                seen: self.seen.clone(),
            }))
        }
    }

    fn collaborators(default_language: bool) -> Collaborators {
        Collaborators::new(
            Arc::new(StaticPermissions { default_language }),
            Arc::new(BracketIcons),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    fn container_context(collapsed: bool, factory: Arc<dyn NodeFactory>) -> RenderContext {
        RenderContext::builder()
            .table("pages")
            .database_row(DatabaseRow::with_uid(5))
            .field_name("pi_flexform")
            .item_form_element_name("data[pages][5][pi_flexform]")
            .form_prefix("[data][sDEF]")
            .identifier_prefix("data-pages-5")
            .container_counter(2)
            .container_name("item")
            .title("Item")
            .collapsed(collapsed)
            .render_mode(RenderMode::Container)
            .node_factory(factory)
            .build()
            .unwrap()
    }

    fn canned_factory(html: &str) -> (Arc<CannedFactory>, Arc<Mutex<Vec<RenderContext>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let factory = Arc::new(CannedFactory {
            result: RenderResult::new(html).with_aux("requireJsModules", json!(["Child"])),
            seen: seen.clone(),
        });
        (factory, seen)
    }

    const EXPANDED_CONTAINER: &str = r##"<div id="data-pages-5-0000000001" class="t3-form-field-container-flexsections t3-flex-section">
<input class="t3-flex-control t3-flex-control-action" type="hidden" name="_ACTION_FLEX_FORMdata[pages][5][pi_flexform][data][sDEF][_ACTION][2]" value="" />
<div class="t3-form-field-header-flexsection t3-flex-section-header">
<div class="pull-left">
<a href="#" class="t3-flex-control-toggle-button"><span class="t3-flex-control-toggle-icon-open" style="">[i:actions-move-down]</span><span class="t3-flex-control-toggle-icon-close" style="display: none;">[i:actions-move-right]</span></a>
<span class="t3-record-title">Item</span>
</div>
<div class="pull-right">
<span title="Drag to Move" class="t3-js-sortable-handle">[i:actions-move-move]</span>
<span title="Delete" class="t3-js-delete">[i:actions-edit-delete]</span>
</div>
</div>
<div class="t3-form-field-record-flexsection t3-flex-section-content">
<p>child</p>
</div>
<input
class="t3-flex-control t3-flex-control-toggle"
id="data-pages-5-0000000001-toggleClosed"
type="hidden"
name="data[pages][5][pi_flexform][data][sDEF][2][_TOGGLE]"
value="0"
/>
</div>"##;

    #[test]
    fn test_expanded_container_markup() {
        let (factory, _) = canned_factory("<p>child</p>");
        let context = container_context(false, factory);

        let result = ContainerRenderer::new(collaborators(true)).render(&context).unwrap();

        assert_eq!(result.html, EXPANDED_CONTAINER);
        assert_eq!(result.aux["requireJsModules"], json!(["Child"]));
    }

    #[test]
    fn test_collapsed_container_hides_content() {
        let (factory, _) = canned_factory("<p>child</p>");
        let context = container_context(true, factory);

        let html = ContainerRenderer::new(collaborators(true))
            .render(&context)
            .unwrap()
            .html;

        assert!(html.contains(
            "<div class=\"t3-form-field-record-flexsection t3-flex-section-content\" style=\"display:none;\">"
        ));
        assert!(html.contains("value=\"1\"\n/>"));
        assert!(html.contains(
            "<span class=\"t3-flex-control-toggle-icon-open\" style=\"display: none;\">"
        ));
        assert!(html.contains("<span class=\"t3-flex-control-toggle-icon-close\" style=\"\">"));
    }

    #[test]
    fn test_denied_default_language_omits_controls() {
        let (factory, _) = canned_factory("<p>child</p>");
        let context = container_context(false, factory);

        let html = ContainerRenderer::new(collaborators(false))
            .render(&context)
            .unwrap()
            .html;

        assert!(!html.contains("t3-js-sortable-handle"));
        assert!(!html.contains("t3-js-delete"));
        assert!(!html.contains("pull-right"));
        // Apart from the controls nothing changes
        let expected = EXPANDED_CONTAINER.replace(
            "<div class=\"pull-right\">\n<span title=\"Drag to Move\" class=\"t3-js-sortable-handle\">[i:actions-move-move]</span>\n<span title=\"Delete\" class=\"t3-js-delete\">[i:actions-edit-delete]</span>\n</div>\n",
            "",
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_child_markup_is_embedded_once() {
        let (factory, _) = canned_factory("<p id=\"unique-child\">child</p>");
        let context = container_context(false, factory);

        let result = ContainerRenderer::new(collaborators(true)).render(&context).unwrap();

        assert_eq!(result.html.matches("unique-child").count(), 1);
    }

    #[test]
    fn test_renders_differ_only_in_token() {
        let (factory, _) = canned_factory("<p>child</p>");
        let context = container_context(false, factory);
        let renderer = ContainerRenderer::new(collaborators(true));

        let first = renderer.render(&context).unwrap().html;
        let second = renderer.render(&context).unwrap().html;

        assert_ne!(first, second);
        assert_eq!(first.replace("0000000001", "TOKEN"), second.replace("0000000002", "TOKEN"));
    }

    #[test]
    fn test_child_context_is_derived() {
        let (factory, seen) = canned_factory("<p>child</p>");
        let context = container_context(false, factory);

        ContainerRenderer::new(collaborators(true)).render(&context).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let child = &seen[0];
        assert_eq!(child.render_mode(), RenderMode::ElementGroup);
        assert_eq!(child.form_prefix(), "[data][sDEF][2][item][el]");
        assert_eq!(child.identifier_prefix(), "data-pages-5-0000000001");
        assert_eq!(child.table(), "pages");
        assert_eq!(child.title(), "Item");
        assert_eq!(context.form_prefix(), "[data][sDEF]");
    }

    #[test]
    fn test_sibling_containers_do_not_share_ids_or_prefixes() {
        let (factory, seen) = canned_factory("<p>child</p>");
        let section = RenderContext::builder()
            .table("pages")
            .database_row(DatabaseRow::with_uid(5))
            .field_name("pi_flexform")
            .item_form_element_name("data[pages][5][pi_flexform]")
            .form_prefix("[data][sDEF]")
            .identifier_prefix("data-pages-5")
            .node_factory(factory)
            .build()
            .unwrap();
        let instance = ContainerInstance {
            name: "item".to_string(),
            title: "Item".to_string(),
            collapsed: false,
            elements: Vec::new(),
        };
        let renderer = ContainerRenderer::new(collaborators(true));

        renderer.render(&section.for_container(0, &instance)).unwrap();
        renderer.render(&section.for_container(1, &instance)).unwrap();

        let seen = seen.lock().unwrap();
        assert_ne!(seen[0].identifier_prefix(), seen[1].identifier_prefix());
        assert_eq!(seen[0].form_prefix(), "[data][sDEF][0][item][el]");
        assert_eq!(seen[1].form_prefix(), "[data][sDEF][1][item][el]");
        assert!(!seen[0].form_prefix().contains("[1]"));
        assert!(!seen[1].form_prefix().contains("[0]"));
    }

    #[test]
    fn test_generated_names_are_attribute_escaped() {
        let (factory, _) = canned_factory("");
        let context = RenderContext::builder()
            .table("pages")
            .database_row(DatabaseRow::with_uid(5))
            .field_name("pi_flexform")
            .item_form_element_name("data[pages][5][pi_flexform]")
            .form_prefix("[data][\"sDEF\"]")
            .identifier_prefix("data-pages-5")
            .render_mode(RenderMode::Container)
            .node_factory(factory)
            .build()
            .unwrap();

        let html = ContainerRenderer::new(collaborators(true))
            .render(&context)
            .unwrap()
            .html;

        assert!(html.contains("[data][&quot;sDEF&quot;][_ACTION][0]"));
        assert!(html.contains("name=\"data[pages][5][pi_flexform][data][&quot;sDEF&quot;][0][_TOGGLE]\""));
        assert!(!html.contains("[\"sDEF\"]"));
    }

    #[test]
    fn test_element_group_renders_leaf_fields() {
        let collaborators = collaborators(true);
        let factory: Arc<dyn NodeFactory> = Arc::new(DefaultNodeFactory::new(collaborators));
        let context = RenderContext::builder()
            .table("tt_content")
            .database_row(DatabaseRow::with_uid("NEW42"))
            .field_name("pi_flexform")
            .item_form_element_name("data[tt_content][NEW42][pi_flexform]")
            .form_prefix("[data][sDEF][lDEF][slides][0][slide][el]")
            .identifier_prefix("slides-0000000001")
            .elements(vec![
                ElementConfig::new("header", "Header").with_value("Tom & Jerry"),
                ElementConfig::new("body", "Body").with_kind(ElementKind::Text),
                ElementConfig::new("hidden", "Hide").with_kind(ElementKind::Check).with_value("1"),
            ])
            .render_mode(RenderMode::ElementGroup)
            .node_factory(factory.clone())
            .build()
            .unwrap();

        let result = factory.create(&context).unwrap().render(&context).unwrap();

        let expected = r#"<div class="t3-form-field-container-flexsection-elements">
<div class="form-group t3js-formengine-palette-field">
<label class="t3js-formengine-label" for="slides-0000000001-header">Header</label>
<input type="text" class="form-control" id="slides-0000000001-header" name="data[tt_content][NEW42][pi_flexform][data][sDEF][lDEF][slides][0][slide][el][header][vDEF]" value="Tom &amp; Jerry" />
</div>
<div class="form-group t3js-formengine-palette-field">
<label class="t3js-formengine-label" for="slides-0000000001-body">Body</label>
<textarea class="form-control" id="slides-0000000001-body" name="data[tt_content][NEW42][pi_flexform][data][sDEF][lDEF][slides][0][slide][el][body][vDEF]" rows="5"></textarea>
</div>
<div class="form-group t3js-formengine-palette-field">
<label class="t3js-formengine-label" for="slides-0000000001-hidden">Hide</label>
<input type="hidden" name="data[tt_content][NEW42][pi_flexform][data][sDEF][lDEF][slides][0][slide][el][hidden][vDEF]" value="0" />
<input type="checkbox" class="checkbox" id="slides-0000000001-hidden" name="data[tt_content][NEW42][pi_flexform][data][sDEF][lDEF][slides][0][slide][el][hidden][vDEF]" value="1" checked="checked" />
</div>
</div>"#;
        assert_eq!(result.html, expected);
        assert_eq!(
            result.aux["requireJsModules"],
            json!(["TYPO3/CMS/Backend/FormEngine/Element/TextElement"])
        );
    }

    #[test]
    fn test_section_numbers_containers_by_position() {
        let collaborators = collaborators(true);
        let factory: Arc<dyn NodeFactory> = Arc::new(DefaultNodeFactory::new(collaborators));
        let instance = |title: &str| ContainerInstance {
            name: "slide".to_string(),
            title: title.to_string(),
            collapsed: false,
            elements: vec![ElementConfig::new("header", "Header")],
        };
        let context = RenderContext::builder()
            .table("tt_content")
            .database_row(DatabaseRow::with_uid(12))
            .field_name("pi_flexform")
            .item_form_element_name("data[tt_content][12][pi_flexform]")
            .form_prefix("[data][sDEF][lDEF][slides]")
            .identifier_prefix("slides")
            .title("Slides")
            .containers(vec![instance("One"), instance("Two"), instance("Three")])
            .node_factory(factory.clone())
            .build()
            .unwrap();

        let result = factory.create(&context).unwrap().render(&context).unwrap();
        let html = &result.html;

        assert!(html.starts_with("<div class=\"t3-form-field-container t3-form-flex\">\n<div class=\"t3-form-field-label-flexsection\"><strong>Slides</strong></div>\n<div id=\"slides-0000000001\""));
        for counter in 0..3 {
            assert!(html.contains(&format!("[data][sDEF][lDEF][slides][_ACTION][{}]", counter)));
            assert!(html.contains(&format!("[slides][{}][slide][el][header][vDEF]", counter)));
        }
        let one = html.find(">One<").unwrap();
        let two = html.find(">Two<").unwrap();
        let three = html.find(">Three<").unwrap();
        assert!(one < two && two < three);
        assert_eq!(
            result.aux["requireJsModules"],
            json!(["TYPO3/CMS/Backend/FormEngineFlexForm"])
        );
    }
}
