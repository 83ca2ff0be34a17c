//! End-to-end front end tests over the vetted samples
//!
//! Each test loads a file from `samples/`, runs the default pipeline and checks the whole
//! tree shape with `assert_tree`.

use f2x_parser::fortran::ast::{NodeKind, ParseError};
use f2x_parser::fortran::loader::{LoaderError, SourceLoader};
use f2x_parser::fortran::testing::{assert_tree, load_sample, parse_sample};
use f2x_parser::fortran::transforms::standard::ParseOptions;

fn parse_error(err: LoaderError) -> ParseError {
    match err {
        LoaderError::TransformError(inner) => inner
            .parse_error()
            .cloned()
            .unwrap_or_else(|| panic!("expected a parse error, got {}", inner)),
        other => panic!("expected a parse error, got {}", other),
    }
}

#[test]
fn test_subroutine_with_declaration_and_assignment() {
    // subroutine.f90: foo(x) declares x and assigns it
    let root = parse_sample("subroutine.f90");

    assert_tree(&root).child_count(1).child(0, |sub| {
        sub.kind(NodeKind::Subroutine)
            .tag("foo")
            .depth(1)
            .child_count(2)
            .child(0, |decl| {
                decl.kind(NodeKind::Declaration).tag("x").text("integer x");
            })
            .child(1, |stmt| {
                stmt.kind(NodeKind::Assignment)
                    .tag("x")
                    .text("x = 1")
                    .line(3)
                    .depth(2);
            });
    });
}

#[test]
fn test_continuation_fuses_into_one_statement() {
    // continuation.f90: `x = 1 +&` continued by `&    2`
    let root = parse_sample("continuation.f90");

    assert_tree(&root).child_count(1).child(0, |stmt| {
        stmt.kind(NodeKind::Assignment)
            .tag("x")
            .text("x = 1 + 2")
            .line(1);
    });
}

#[test]
fn test_archaic_loop_closed_by_labeled_continue() {
    // archaic_loop.f: do 10 ... 10 continue
    let root = parse_sample("archaic_loop.f");

    assert_tree(&root).child_count(1).child(0, |lp| {
        lp.kind(NodeKind::ArchaicLabeledLoop)
            .loop_label(10)
            .tag("i")
            .child_count(1)
            .child(0, |body| {
                body.kind(NodeKind::Assignment).tag("y");
            });
    });
}

#[test]
fn test_archaic_loop_with_wrong_label_stays_open() {
    // archaic_unterminated.f: do 10 ... 20 continue
    let err = load_sample("archaic_unterminated.f").parse().unwrap_err();

    assert_eq!(
        parse_error(err),
        ParseError::UnterminatedBlock {
            kind: NodeKind::ArchaicLabeledLoop,
            line: 1,
        }
    );
}

#[test]
fn test_unknown_directive_is_unclassifiable() {
    let err = SourceLoader::from_string("#define FOO 1\n").parse().unwrap_err();

    assert_eq!(
        parse_error(err),
        ParseError::Unclassifiable {
            line: 1,
            text: "#define FOO 1".to_string(),
        }
    );
}

#[test]
fn test_prune_using_keeps_siblings() {
    let options = ParseOptions {
        drop_using: true,
        ..ParseOptions::default()
    };
    let root = SourceLoader::from_string("x = 1\nuse mpi\ny = 2\n")
        .parse_with(&options)
        .unwrap();

    assert_tree(&root)
        .child_count(2)
        .child(0, |a| {
            a.tag("x").line(1);
        })
        .child(1, |b| {
            b.tag("y").line(3);
        });
}

#[test]
fn test_always_true_conditional_drops_else_branch() {
    // preprocessor.F90: #if 1 / use fast_kernels / #else / use slow_kernels / #endif
    let root = parse_sample("preprocessor.F90");

    assert_tree(&root).child_count(1).child(0, |program| {
        program
            .kind(NodeKind::Program)
            .tag("cond")
            .child_count(5)
            .child(0, |d| {
                d.kind(NodeKind::PreprocessorDirective).text("#if 1");
            })
            .child(1, |u| {
                u.kind(NodeKind::Using).tag("fast_kernels");
            })
            .child(2, |d| {
                d.kind(NodeKind::PreprocessorDirective).text("#else");
            })
            .child(3, |d| {
                d.kind(NodeKind::PreprocessorDirective).text("#endif");
            })
            .child(4, |c| {
                c.kind(NodeKind::Call).tag("run");
            });
    });
}

#[test]
fn test_directives_in_dead_branch_are_dropped() {
    let source = "#if 1\nx = 1\n#else\n#ifdef DEBUG\ny = 2\n#endif\n#endif\n";
    let root = SourceLoader::from_string(source).parse().unwrap();

    assert_tree(&root)
        .child_count(4)
        .child(0, |d| {
            d.kind(NodeKind::PreprocessorDirective).text("#if 1");
        })
        .child(1, |a| {
            a.kind(NodeKind::Assignment).tag("x");
        })
        .child(2, |d| {
            d.kind(NodeKind::PreprocessorDirective).text("#else");
        })
        .child(3, |d| {
            d.kind(NodeKind::PreprocessorDirective).text("#endif").line(7);
        });
}

#[test]
fn test_labeled_end_do_terminates_archaic_loop() {
    let root = SourceLoader::from_string("do 10 i = 1, n\nx = i\n10 end do\n")
        .parse()
        .unwrap();

    assert_tree(&root).child_count(1).child(0, |lp| {
        lp.kind(NodeKind::ArchaicLabeledLoop)
            .loop_label(10)
            .child_count(1)
            .child(0, |body| {
                body.kind(NodeKind::Assignment).tag("x");
            });
    });
}

#[test]
fn test_fixed_form_legacy_subroutine() {
    // legacy.f: upper-case fixed-form source with a shared terminal label
    let root = parse_sample("legacy.f");

    assert_tree(&root).child_count(1).child(0, |sub| {
        sub.kind(NodeKind::Subroutine)
            .tag("TRISUM")
            .comments(&["Sum the upper triangle"])
            .child_count(7)
            .child(3, |outer| {
                outer
                    .kind(NodeKind::ArchaicLabeledLoop)
                    .loop_label(20)
                    .tag("I")
                    .child_count(1)
                    .child(0, |inner| {
                        inner
                            .kind(NodeKind::ArchaicLabeledLoop)
                            .loop_label(20)
                            .tag("J")
                            .child_count(1);
                    });
            })
            .child(4, |cond| {
                cond.kind(NodeKind::Conditional)
                    .no_else()
                    .child_count(1)
                    .child(0, |jump| {
                        jump.kind(NodeKind::Goto).tag("30").line(10).synthetic(1);
                    });
            })
            .child(5, |ret| {
                ret.kind(NodeKind::Return);
            })
            .child(6, |print| {
                print
                    .kind(NodeKind::Print)
                    .label(30)
                    .text("30 PRINT *, 'negative'");
            });
    });
}

#[test]
fn test_where_block_and_single_statement_where() {
    // where.f90: masked assignment with elsewhere, then a one-line where
    let root = parse_sample("where.f90");

    assert_tree(&root).child(0, |sub| {
        sub.kind(NodeKind::Subroutine)
            .tag("clip")
            .child_count(4)
            .child(2, |masked| {
                masked
                    .kind(NodeKind::WhereLoop)
                    .child_count(1)
                    .elsewhere_child(0, |stmt| {
                        stmt.kind(NodeKind::Assignment).text("a = a * 2.0");
                    });
            })
            .child(3, |single| {
                single
                    .kind(NodeKind::WhereLoop)
                    .child_count(1)
                    .child(0, |stmt| {
                        stmt.kind(NodeKind::Assignment).synthetic(1);
                    });
            });
    });
}

#[test]
fn test_kitchensink_module() {
    let root = parse_sample("kitchensink.f90");

    assert_tree(&root).child_count(2).child(0, |module| {
        module
            .kind(NodeKind::Module)
            .tag("geometry")
            .child_count(5)
            .child(0, |s| {
                s.kind(NodeKind::Implicit);
            })
            .child(1, |ty| {
                ty.kind(NodeKind::DerivedType).tag("point").child_count(1);
            })
            .child(2, |iface| {
                iface.kind(NodeKind::Interface).child(0, |sub| {
                    sub.kind(NodeKind::Subroutine).tag("log_value").child_count(1);
                });
            })
            .child(3, |s| {
                s.kind(NodeKind::Contains);
            })
            .child(4, |func| {
                func.kind(NodeKind::Function)
                    .tag("norm2d")
                    .child_count(3)
                    .child(0, |decl| {
                        decl.kind(NodeKind::Declaration).tag("p");
                    })
                    .child(2, |stmt| {
                        stmt.kind(NodeKind::Assignment).tag("r");
                    });
            });
    });
}

#[test]
fn test_kitchensink_program() {
    let root = parse_sample("kitchensink.f90");

    assert_tree(&root).child(1, |program| {
        program
            .kind(NodeKind::Program)
            .tag("main")
            .child_count(8)
            .child(4, |sum| {
                sum.kind(NodeKind::Assignment)
                    .tag("total")
                    .comments(&["running sum"]);
            })
            .child(5, |lp| {
                lp.kind(NodeKind::Loop)
                    .tag("i")
                    .child_count(2)
                    .child(0, |skip| {
                        skip.kind(NodeKind::Conditional).child(0, |cycle| {
                            cycle.kind(NodeKind::Cycle).tag("outer");
                        });
                    })
                    .child(1, |select| {
                        select
                            .kind(NodeKind::Selection)
                            .child_count(0)
                            .case_count(2)
                            .case(0, |case| {
                                case.condition("(1)").statement_count(1);
                            })
                            .case(1, |case| {
                                case.condition("default").statement(0, |stmt| {
                                    stmt.kind(NodeKind::Assignment).text("total = total + 2.0");
                                });
                            });
                    });
            })
            .child(6, |first| {
                first
                    .kind(NodeKind::Conditional)
                    .chained(false)
                    .no_else()
                    .child_count(1);
            })
            .child(7, |second| {
                second
                    .kind(NodeKind::Conditional)
                    .chained(true)
                    .child_count(1)
                    .else_count(1)
                    .else_child(0, |stmt| {
                        stmt.kind(NodeKind::Print).text("print *, 'small'");
                    });
            });
    });
}

#[test]
fn test_mismatched_closer_reports_both_kinds() {
    let err = SourceLoader::from_string("do i = 1, n\nx = i\nend if\n")
        .parse()
        .unwrap_err();

    assert_eq!(
        parse_error(err),
        ParseError::BlockMismatch {
            expected: NodeKind::Conditional,
            found: NodeKind::Loop,
            line: 3,
            text: "end if".to_string(),
        }
    );
}

#[test]
fn test_second_else_is_misplaced() {
    let source = "if (a) then\nx = 1\nelse\nx = 2\nelse\nx = 3\nend if\n";
    let err = SourceLoader::from_string(source).parse().unwrap_err();

    assert_eq!(
        parse_error(err),
        ParseError::MisplacedBranch {
            found: NodeKind::Conditional,
            line: 5,
            text: "else".to_string(),
        }
    );
}

#[test]
fn test_orphan_continuation() {
    let err = SourceLoader::from_string("&  x = 1\n").parse().unwrap_err();
    assert_eq!(parse_error(err), ParseError::Continuation { line: 1 });
}
